//! Path resolution utilities for CLI commands

use std::path::{Path, PathBuf};

/// Resolve the base directory holding all subjects.
///
/// `--base-dir` (or `SAITEN_BASE_DIR`) wins over the configured directory.
pub fn resolve_base_dir(flag: Option<&Path>, configured: &Path) -> PathBuf {
    flag.unwrap_or(configured).to_path_buf()
}
