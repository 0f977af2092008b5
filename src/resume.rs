//! Resume support for interrupted runs.
//!
//! A prior run leaves outputs named `<id>__<timestamp>_<n>.png`; scanning the
//! output directory for those prefixes tells us which targets are already
//! done.

use std::collections::HashSet;
use std::path::Path;

use crate::error::RetoqueError;
use crate::images::Target;
use crate::ui::BatchProgress;

/// Separator between the source identifier and the timestamp suffix in
/// output filenames. Resume takes the prefix before the *first* occurrence,
/// so a source stem that itself contains the delimiter resumes on its first
/// segment.
pub const OUTPUT_DELIMITER: &str = "__";

/// Scan `output_dir` (non-recursively) for identifiers of already-produced
/// outputs. A missing directory yields an empty set.
pub fn collect_completed_ids(output_dir: &Path) -> Result<HashSet<String>, RetoqueError> {
    let mut completed = HashSet::new();
    if !output_dir.is_dir() {
        return Ok(completed);
    }
    for entry in std::fs::read_dir(output_dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        if let Some((prefix, _)) = name.split_once(OUTPUT_DELIMITER) {
            completed.insert(prefix.to_string());
        }
    }
    Ok(completed)
}

/// Drop targets whose identifier already has an output, preserving order.
pub fn filter_pending(
    targets: Vec<Target>,
    output_dir: &Path,
    progress: &BatchProgress,
) -> Result<Vec<Target>, RetoqueError> {
    let completed = collect_completed_ids(output_dir)?;
    let total = targets.len();
    let pending: Vec<Target> = targets
        .into_iter()
        .filter(|t| !completed.contains(&t.id))
        .collect();
    let skipped = total - pending.len();
    if skipped > 0 {
        progress.resume_skipped(skipped);
    }
    Ok(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn target(id: &str) -> Target {
        Target {
            id: id.to_string(),
            path: PathBuf::from(format!("{id}.jpg")),
        }
    }

    #[test]
    fn completed_ids_use_prefix_before_first_delimiter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("photo1__20240101-000000_1.png"), b"x").unwrap();
        fs::write(dir.path().join("photo1__20240101-000000_2.png"), b"x").unwrap();

        let completed = collect_completed_ids(dir.path()).unwrap();
        assert_eq!(completed, HashSet::from(["photo1".to_string()]));
    }

    #[test]
    fn missing_output_dir_yields_empty_set() {
        let completed = collect_completed_ids(Path::new("/no/such/outputs")).unwrap();
        assert!(completed.is_empty());
    }

    #[test]
    fn hidden_and_delimiterless_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".DS_Store"), b"x").unwrap();
        fs::write(dir.path().join("stray.png"), b"x").unwrap();

        let completed = collect_completed_ids(dir.path()).unwrap();
        assert!(completed.is_empty());
    }

    #[test]
    fn filter_pending_preserves_order_and_drops_completed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("photo1__20240101-000000_1.png"), b"x").unwrap();

        let targets = vec![target("photo0"), target("photo1"), target("photo2")];
        let progress = BatchProgress::hidden();
        let pending = filter_pending(targets, dir.path(), &progress).unwrap();

        assert_eq!(
            pending.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["photo0", "photo2"]
        );
    }

    #[test]
    fn filter_pending_without_outputs_keeps_everything() {
        let dir = TempDir::new().unwrap();
        let targets = vec![target("a"), target("b")];
        let progress = BatchProgress::hidden();
        let pending = filter_pending(targets.clone(), dir.path(), &progress).unwrap();
        assert_eq!(pending, targets);
    }
}
