//! Generation calls and output persistence.
//!
//! [`Generator`] assembles the multimodal request for one target (the photo,
//! the optional sample pair, the prompt), calls the generation client and
//! writes every returned inline image to the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Local;

use crate::gemini::{Content, GenerateContent, GenerateContentRequest, GenerateContentResponse, Part};
use crate::images::{Target, mime_for_path};
use crate::resume::OUTPUT_DELIMITER;
use crate::samples::SampleBundle;

/// Wraps a generation client with the model name and the persistence step.
pub struct Generator<C: GenerateContent> {
    client: C,
    model: String,
}

impl<C: GenerateContent> Generator<C> {
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Send one target through the generation call and persist every inline
    /// image of the response, returning the written paths.
    ///
    /// A response without inline image data is an error, so the caller's
    /// retry loop treats it like any other failed attempt.
    pub async fn generate(
        &self,
        prompt: &str,
        target: &Target,
        output_dir: &Path,
        samples: Option<&SampleBundle>,
    ) -> Result<Vec<PathBuf>> {
        let mut parts = vec![read_image_part(&target.path)?];
        if let Some(bundle) = samples {
            parts.push(read_image_part(&bundle.reference_input)?);
            parts.push(read_image_part(&bundle.reference_output)?);
        }
        parts.push(Part::text(prompt));

        let req = GenerateContentRequest {
            contents: vec![Content { parts }],
        };
        let response = self.client.generate_content(&self.model, &req).await?;

        let saved = persist_inline_images(&response, output_dir, &target.id)?;
        if saved.is_empty() {
            bail!(
                "Gemini response for '{}' did not contain inline image data",
                target.path.display()
            );
        }
        Ok(saved)
    }
}

fn read_image_part(path: &Path) -> Result<Part> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image '{}'", path.display()))?;
    Ok(Part::inline_data(mime_for_path(path), STANDARD.encode(bytes)))
}

/// Write each inline-image part as `<basename>__<timestamp>_<n>.png`, where
/// `n` is the part's 1-based position in the response.
fn persist_inline_images(
    response: &GenerateContentResponse,
    output_dir: &Path,
    basename: &str,
) -> Result<Vec<PathBuf>> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let mut saved = Vec::new();

    for (idx, part) in response.parts().iter().enumerate() {
        let Some(inline) = &part.inline_data else {
            continue;
        };
        let bytes = STANDARD
            .decode(&inline.data)
            .context("invalid base64 in response inline data")?;
        let filename = format!("{basename}{OUTPUT_DELIMITER}{timestamp}_{}.png", idx + 1);
        let destination = output_dir.join(filename);
        std::fs::write(&destination, bytes)
            .with_context(|| format!("failed to write '{}'", destination.display()))?;
        saved.push(destination);
    }

    Ok(saved)
}
