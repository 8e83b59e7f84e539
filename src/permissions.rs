use anyhow::{Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonicalizes a path that may not exist yet by resolving its deepest existing ancestor.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    for ancestor in absolute.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize() {
            let remainder = absolute.strip_prefix(ancestor)?;
            return Ok(canonical.join(remainder));
        }
    }

    Err(anyhow!(
        "Failed to resolve path '{}'. It might not exist or there's a permission issue.",
        path.display()
    ))
}

/// Checks that `backup_dir` can receive a copy of `target_dir`.
///
/// The backup must not live inside the target, since it would then be walked and migrated
/// along with the originals, and an existing non-empty backup is never overwritten.
pub fn ensure_backup_location(target_dir: &Path, backup_dir: &Path) -> Result<()> {
    let canonical_target = resolve(target_dir)?;
    let canonical_backup = resolve(backup_dir)?;

    if canonical_backup.starts_with(&canonical_target) {
        return Err(anyhow!(
            "Backup directory '{}' must not be inside the directory being migrated '{}'.",
            backup_dir.display(),
            target_dir.display()
        ));
    }

    if backup_dir.is_file() {
        return Err(anyhow!(
            "Backup path '{}' exists and is not a directory.",
            backup_dir.display()
        ));
    }

    if backup_dir.is_dir() && fs::read_dir(backup_dir)?.next().is_some() {
        return Err(anyhow!(
            "Backup directory '{}' already exists and is not empty.",
            backup_dir.display()
        ));
    }

    Ok(())
}
