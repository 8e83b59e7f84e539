//! # Migration Run
//!
//! Drives the rewrite engine over a directory tree:
//!
//! 1.  **Backup**: every file under the target directory is copied to the same relative path
//!     under the backup directory before anything is modified.
//! 2.  **Identifier rewrite**: files with a configured extension are streamed through the
//!     pattern chain for their syntax.
//! 3.  **Provider rewrite**: configuration files additionally get their `required_providers`
//!     and `provider` blocks rewritten.
//!
//! Both rewrites run in memory and the result is written once, atomically. With `dry_run` the
//! backup is skipped and a diff is printed instead of writing.

use crate::config::Config;
use crate::diff;
use crate::dispatch::rewrite_file;
use crate::document::rewrite_provider_declarations;
use crate::error::MigrationError;
use crate::path_expander;
use crate::permissions;
use anyhow::{Context, Result, anyhow};
use console::style;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    pub dir: PathBuf,
    pub backup_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub keep_going: bool,
    pub quiet: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub backed_up: usize,
    pub migrated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: Vec<PathBuf>,
}

impl MigrationReport {
    pub fn summary(&self) -> String {
        format!(
            "Backed up {} files. Migrated: {}, unchanged: {}, skipped: {}, failed: {}",
            self.backed_up,
            self.migrated,
            self.unchanged,
            self.skipped,
            self.failed.len()
        )
    }
}

/// Applies both rewrites to the content of one file.
pub fn migrate_content(
    content: &str,
    extension: &str,
    config: &Config,
) -> Result<String, MigrationError> {
    let rewritten = rewrite_file(content, extension);
    if config.rewrites_providers(extension) {
        rewrite_provider_declarations(&rewritten)
    } else {
        Ok(rewritten)
    }
}

/// `<dir><suffix>` next to `dir`.
pub fn default_backup_dir(dir: &Path, suffix: &str) -> Result<PathBuf> {
    let canonical = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory '{}'", dir.display()))?;
    let name = canonical
        .file_name()
        .ok_or_else(|| anyhow!("Cannot derive a backup directory for '{}'", dir.display()))?;
    let mut backup_name = name.to_os_string();
    backup_name.push(suffix);
    Ok(canonical.with_file_name(backup_name))
}

/// The line-rewrite stage emits every line with a trailing `\n`, so compare against the same shape.
fn normalize_line_endings(content: &str) -> String {
    content.lines().map(|line| format!("{line}\n")).collect()
}

fn migrated_label(dry_run: bool) -> &'static str {
    if dry_run { "Would migrate" } else { "Migrating" }
}

fn progress(options: &MigrationOptions, message: impl std::fmt::Display) {
    if !options.quiet {
        println!("{message}");
    }
}

/// Copies `source` to `destination`, creating parent directories. Returns bytes copied.
fn backup_file(source: &Path, destination: &Path) -> Result<u64> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create backup directory '{}'", parent.display())
        })?;
    }
    fs::copy(source, destination).with_context(|| {
        format!(
            "Failed to copy '{}' to '{}'",
            source.display(),
            destination.display()
        )
    })
}

/// Replaces `path` with `content` via a temporary file in the same directory.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in '{}'", dir.display()))?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().set_permissions(permissions)?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(())
}

/// Migrates one file. Returns whether its content changed.
fn migrate_file(
    path: &Path,
    extension: &str,
    config: &Config,
    options: &MigrationOptions,
) -> Result<bool> {
    if config.rewrites_providers(extension) {
        let size = fs::metadata(path)?.len();
        if size > config.max_file_size {
            return Err(anyhow!(
                "File too large to process: {size} bytes, limit is {}",
                config.max_file_size
            ));
        }
    }

    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let migrated = migrate_content(&original, extension, config)?;

    let normalized = normalize_line_endings(&original);
    if migrated == normalized {
        return Ok(false);
    }

    if options.dry_run {
        println!("{}", style(path.display()).bold());
        println!("{}", diff::generate_diff(&normalized, &migrated));
    } else {
        write_atomically(path, &migrated)?;
    }
    Ok(true)
}

/// Runs the whole migration for `options.dir`.
pub fn run(config: &Config, options: &MigrationOptions) -> Result<MigrationReport> {
    let dir = &options.dir;
    if !dir.is_dir() {
        return Err(anyhow!(
            "Error: The provided path '{}' is not a directory.",
            dir.display()
        ));
    }

    let files = path_expander::collect_files(dir, &config.ignored_paths)?;
    let mut report = MigrationReport::default();

    if !options.dry_run {
        let backup_dir = match &options.backup_dir {
            Some(backup_dir) => backup_dir.clone(),
            None => default_backup_dir(dir, &config.backup_suffix)?,
        };
        permissions::ensure_backup_location(dir, &backup_dir)?;

        for file in &files {
            let destination = backup_dir.join(file.strip_prefix(dir)?);
            let size = backup_file(file, &destination)?;
            progress(
                options,
                format!(
                    "Copying {} --> {}, {size} bytes",
                    file.display(),
                    destination.display()
                ),
            );
            report.backed_up += 1;
        }
    }

    for file in &files {
        let extension = file
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();

        if !config.rewrites_extension(extension) {
            progress(options, style(format!("Skipping {}", file.display())).dim());
            report.skipped += 1;
            continue;
        }

        match migrate_file(file, extension, config, options) {
            Ok(true) => {
                let label = migrated_label(options.dry_run);
                progress(options, style(format!("{label} {}", file.display())).green());
                report.migrated += 1;
            }
            Ok(false) => {
                progress(options, style(format!("Unchanged {}", file.display())).dim());
                report.unchanged += 1;
            }
            Err(e) if options.keep_going => {
                eprintln!(
                    "{}",
                    style(format!("Failed {}: {e:#}", file.display())).red()
                );
                report.failed.push(file.clone());
            }
            Err(e) => {
                return Err(e.context(format!("Failed to migrate '{}'", file.display())));
            }
        }
    }

    Ok(report)
}
