//! Filesystem helpers shared by the ledger, gradebook and workspace

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SaitenError};

/// Replace `path` with `content` via a sibling temp file and `rename`, so a
/// crash mid-write never leaves a truncated file behind.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SaitenError::Other(format!("not a file path: {}", path.display())))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    result.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SaitenError::io_operation("write", path.display(), e)
    })
}

/// Sorted names of the non-hidden subdirectories of `path`
pub fn list_subdirs(path: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(path).map_err(|e| SaitenError::io_operation("list", path.display(), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// True if `path` is a directory with at least one non-hidden entry
pub fn has_visible_entries(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    for entry in fs::read_dir(path)? {
        if !entry?.file_name().to_string_lossy().starts_with('.') {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Recursively copy the contents of `src` into `dst`.
///
/// Top-level entries for which `skip` returns true are not copied. Existing
/// files in `dst` are overwritten. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path, skip: impl Fn(&str) -> bool) -> Result<usize> {
    fs::create_dir_all(dst)
        .map_err(|e| SaitenError::io_operation("create", dst.display(), e))?;

    let mut copied = 0;
    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() != 1 || !skip(&entry.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = entry.map_err(|e| SaitenError::io_operation("walk", src.display(), e))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SaitenError::Other(e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| SaitenError::io_operation("create", target.display(), e))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| SaitenError::io_operation("copy", entry.path().display(), e))?;
            copied += 1;
        }
    }

    tracing::debug!(src = %src.display(), dst = %dst.display(), copied, "copy_tree");
    Ok(copied)
}
