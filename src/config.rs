use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "equinix-migrate/config.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Extensions (without the dot) whose files get the line-by-line identifier rewrite.
    pub extensions: Vec<String>,
    /// Extensions whose files additionally get the provider block rewrite.
    pub provider_extensions: Vec<String>,
    /// Gitignore-style globs excluded from the walk, backup included.
    pub ignored_paths: Vec<String>,
    /// Files larger than this many bytes are rejected before the block rewrite.
    pub max_file_size: u64,
    /// The backup directory is `<dir><backup_suffix>` unless overridden on the command line.
    pub backup_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["tf".to_string(), "tfstate".to_string()],
            provider_extensions: vec!["tf".to_string()],
            ignored_paths: vec![".terraform".to_string(), ".git".to_string()],
            max_file_size: 1024 * 1024,
            backup_suffix: "_backup".to_string(),
        }
    }
}

impl Config {
    pub fn rewrites_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    pub fn rewrites_providers(&self, extension: &str) -> bool {
        self.provider_extensions.iter().any(|e| e == extension)
    }

    /// Replaces empty fields with their defaults.
    fn with_defaults(self) -> Self {
        let default_config = Config::default();
        Config {
            extensions: if self.extensions.is_empty() {
                default_config.extensions
            } else {
                self.extensions
            },
            provider_extensions: if self.provider_extensions.is_empty() {
                default_config.provider_extensions
            } else {
                self.provider_extensions
            },
            ignored_paths: self.ignored_paths,
            max_file_size: if self.max_file_size == 0 {
                default_config.max_file_size
            } else {
                self.max_file_size
            },
            backup_suffix: if self.backup_suffix.is_empty() {
                default_config.backup_suffix
            } else {
                self.backup_suffix
            },
        }
    }
}

/// Loads the config from `path` when given, otherwise from the XDG config directory.
///
/// `quiet` suppresses the notice printed when a default config file is created.
pub fn load(path: Option<&Path>, quiet: bool) -> Result<Config> {
    match path {
        Some(path) => load_from(path),
        None => load_or_create(quiet),
    }
}

/// Reads an explicit config file. Missing fields fall back to defaults.
pub fn load_from(path: &Path) -> Result<Config> {
    let config_string = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config: Config = toml::from_str(&config_string)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    Ok(config.with_defaults())
}

pub fn load_or_create(quiet: bool) -> Result<Config> {
    let xdg_dirs = xdg::BaseDirectories::new();
    let config_path = xdg_dirs.place_config_file(CONFIG_FILE)?;
    load_or_create_at(&config_path, quiet)
}

fn load_or_create_at(config_path: &Path, quiet: bool) -> Result<Config> {
    if !config_path.exists() {
        let default_config = Config::default();
        let toml_string = toml::to_string_pretty(&default_config)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, toml_string)?;

        if !quiet {
            println!("Created default config at: {}", config_path.display());
        }
        return Ok(default_config);
    }

    let config_string = fs::read_to_string(config_path)?;
    let final_config = load_from(config_path)?;

    // Write the completed config back so every available option is visible.
    let final_toml_string = toml::to_string_pretty(&final_config)?;
    if final_toml_string != config_string {
        fs::write(config_path, final_toml_string)?;
    }

    Ok(final_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let tmp_dir = Builder::new().prefix("test-config-").tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (tmp_dir, path)
    }

    #[test]
    fn test_partial_config_is_completed() {
        let (_tmp_dir, path) = write_config("max_file_size = 2048\n");
        let config = load_from(&path).unwrap();
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.extensions, vec!["tf", "tfstate"]);
        assert_eq!(config.backup_suffix, "_backup");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let (_tmp_dir, path) =
            write_config("extensions = []\nbackup_suffix = \"\"\nmax_file_size = 0\n");
        let config = load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_ignored_paths_are_kept() {
        let (_tmp_dir, path) = write_config("ignored_paths = []\n");
        let config = load_from(&path).unwrap();
        assert!(config.ignored_paths.is_empty());
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let (_tmp_dir, path) = write_config("extensions = 5\n");
        let error = load_from(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = load(Some(Path::new("/no/such/equinix-migrate.toml")), true);
        assert!(result.is_err());
    }

    #[test]
    fn test_extension_predicates() {
        let config = Config::default();
        assert!(config.rewrites_extension("tfstate"));
        assert!(!config.rewrites_extension("md"));
        assert!(config.rewrites_providers("tf"));
        assert!(!config.rewrites_providers("tfstate"));
    }

    #[test]
    fn test_quiet_load_creates_default_config() {
        let tmp_dir = Builder::new().prefix("test-config-").tempdir().unwrap();
        let path = tmp_dir.path().join("equinix-migrate/config.toml");

        let config = load_or_create_at(&path, true).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_existing_config_is_completed_on_disk() {
        let (_tmp_dir, path) = write_config("max_file_size = 2048\n");

        let config = load_or_create_at(&path, true).unwrap();
        assert_eq!(config.max_file_size, 2048);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("backup_suffix"));
    }
}
