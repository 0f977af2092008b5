//! Target image discovery.
//!
//! Resolves the `--input` argument into an ordered list of [`Target`]s,
//! honoring the recursion flag, the extension allow-list and the stride
//! sampling factor.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::RetoqueError;

/// File extensions accepted as batch targets, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// One unit of work: a source image to send through the generation call.
///
/// The `id` is the file stem and doubles as the resume identifier: output
/// files produced for this target are named `<id>__...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub path: PathBuf,
}

impl Target {
    fn from_path(path: PathBuf) -> Self {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { id, path }
    }
}

/// MIME type sent to the API for an image path, derived from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    match extension_of(path).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

fn is_allowed(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Resolve `input` into a sorted list of targets.
///
/// A single eligible file yields a one-element list. A directory is listed
/// either at the top level only or at all depths, filtered by
/// [`ALLOWED_EXTENSIONS`] and sorted by full path. `stride` keeps every Nth
/// entry starting from the first.
pub fn collect_targets(
    input: &Path,
    recursive: bool,
    stride: usize,
) -> Result<Vec<Target>, RetoqueError> {
    if stride < 1 {
        return Err(RetoqueError::InvalidArgument(
            "--stride must be >= 1".into(),
        ));
    }

    if input.is_file() {
        if !is_allowed(input) {
            return Err(RetoqueError::InvalidArgument(format!(
                "Unsupported image format '{}'. Supported extensions: {}",
                extension_of(input).unwrap_or_default(),
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        return Ok(vec![Target::from_path(input.to_path_buf())]);
    }

    if input.is_dir() {
        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(input).max_depth(max_depth) {
            let entry = entry?;
            if entry.file_type().is_file() && is_allowed(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        if files.is_empty() {
            return Err(RetoqueError::NotFound(format!(
                "No supported images found under '{}'. Supported extensions: {}",
                input.display(),
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        return Ok(files
            .into_iter()
            .step_by(stride)
            .map(Target::from_path)
            .collect());
    }

    Err(RetoqueError::NotFound(format!(
        "Input path '{}' does not exist",
        input.display()
    )))
}
