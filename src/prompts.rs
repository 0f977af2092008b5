//! Prompt storage and resolution.
//!
//! Prompts live as `*.txt` snippets in a catalog directory; the resolver
//! picks the final prompt text from the CLI inputs with precedence
//! inline text > prompt file > catalog id.

use std::path::{Path, PathBuf};

use crate::error::RetoqueError;

/// Suffix appended to a catalog id when a sample reference pair is in play.
pub const PROMPT_SAMPLE_SUFFIX: &str = "_with_sample";

/// Simple filesystem-backed prompt repository (one `.txt` file per id).
pub struct PromptStore {
    directory: PathBuf,
}

impl PromptStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Sorted ids available in the catalog; empty if the directory is missing.
    pub fn available_ids(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.directory) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        ids.sort();
        ids
    }

    pub fn load(&self, prompt_id: &str) -> Result<String, RetoqueError> {
        let file_path = self.directory.join(format!("{prompt_id}.txt"));
        if !file_path.is_file() {
            return Err(RetoqueError::NotFound(format!(
                "Prompt '{prompt_id}' not found in {}",
                self.directory.display()
            )));
        }
        let text = std::fs::read_to_string(&file_path)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(RetoqueError::InvalidArgument(format!(
                "Prompt file '{}' is empty",
                file_path.display()
            )));
        }
        Ok(text.to_string())
    }
}

/// Resolves the final prompt text based on the CLI inputs.
pub struct PromptResolver<'a> {
    store: &'a PromptStore,
}

impl<'a> PromptResolver<'a> {
    pub fn new(store: &'a PromptStore) -> Self {
        Self { store }
    }

    /// Inline text wins, then a prompt file, then the catalog id. When a
    /// sample pair is supplied the catalog id gets
    /// [`PROMPT_SAMPLE_SUFFIX`] appended before lookup.
    pub fn resolve(
        &self,
        prompt_id: &str,
        prompt_text: Option<&str>,
        prompt_file: Option<&str>,
        requires_sample_prompt: bool,
    ) -> Result<String, RetoqueError> {
        if let Some(text) = prompt_text
            && !text.trim().is_empty()
        {
            return Ok(text.trim().to_string());
        }

        if let Some(file) = prompt_file {
            let path = Path::new(file);
            if !path.is_file() {
                return Err(RetoqueError::NotFound(format!(
                    "Prompt file '{file}' not found"
                )));
            }
            let text = std::fs::read_to_string(path)?;
            let text = text.trim();
            if text.is_empty() {
                return Err(RetoqueError::InvalidArgument(format!(
                    "Prompt file '{file}' is empty"
                )));
            }
            return Ok(text.to_string());
        }

        let resolved_id = if requires_sample_prompt {
            format!("{prompt_id}{PROMPT_SAMPLE_SUFFIX}")
        } else {
            prompt_id.to_string()
        };
        self.store.load(&resolved_id)
    }
}

pub fn format_prompt_listing(prompt_ids: &[String]) -> String {
    let mut lines = vec!["Available prompt IDs:".to_string()];
    for id in prompt_ids {
        lines.push(format!(" - {id}"));
    }
    lines.join("\n")
}
