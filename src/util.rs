#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use walkdir::WalkDir;

use crate::policy::BuildSystem;

/// Walks an exercise and returns the files, relative to `root_dir` and
/// sorted, that `build_system` would move into the student stub.
pub fn files_to_move(root_dir: &Path, build_system: BuildSystem) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();

    for entry in WalkDir::new(root_dir) {
        let entry = entry
            .with_context(|| format!("Could not walk exercise at {}", root_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root_dir)
            .context("Walked outside of the exercise root")?;
        if build_system.should_move(relative) {
            moved.push(relative.to_path_buf());
        }
    }

    tracing::debug!("{} files would move for {}", moved.len(), build_system);
    Ok(moved.into_iter().sorted().collect())
}
