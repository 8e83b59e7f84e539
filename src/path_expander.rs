use anyhow::{Context, Result};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Recursively lists every file under `root`, sorted.
///
/// Hidden files are included and VCS ignore files are not consulted: a Terraform working
/// directory is migrated as a whole. `ignored_paths` are gitignore-style globs; a matching
/// directory is not descended into.
pub fn collect_files(root: &Path, ignored_paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in ignored_paths {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid ignored path pattern '{pattern}'"))?;
    }
    let overrides = overrides.build()?;

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .overrides(overrides)
        .build();

    let mut files = BTreeSet::new();
    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to walk directory '{}'", root.display()))?;
        if entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            files.insert(entry.into_path());
        }
    }

    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::Builder;

    fn setup_test_dir() -> tempfile::TempDir {
        let tmp_dir = Builder::new().prefix("test-expander").tempdir().unwrap();
        let root_path = tmp_dir.path();

        fs::write(root_path.join("main.tf"), "content1").unwrap();
        fs::write(root_path.join("terraform.tfstate"), "{}").unwrap();
        fs::write(root_path.join(".hidden.tf"), "hidden").unwrap();
        fs::write(root_path.join(".gitignore"), "*.tf\n").unwrap();
        fs::create_dir(root_path.join("modules")).unwrap();
        fs::write(root_path.join("modules/vlan.tf"), "content2").unwrap();
        fs::create_dir_all(root_path.join(".terraform/providers")).unwrap();
        fs::write(root_path.join(".terraform/providers/lock"), "lock").unwrap();
        fs::create_dir(root_path.join("empty_dir")).unwrap();

        tmp_dir
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_collects_all_files_sorted() {
        let tmp_dir = setup_test_dir();
        let files = collect_files(tmp_dir.path(), &[]).unwrap();
        assert_eq!(
            relative(tmp_dir.path(), &files),
            vec![
                ".gitignore",
                ".hidden.tf",
                ".terraform/providers/lock",
                "main.tf",
                "modules/vlan.tf",
                "terraform.tfstate",
            ]
        );
    }

    #[test]
    fn test_respects_ignored_paths() {
        let tmp_dir = setup_test_dir();
        let ignored = vec![".terraform".to_string(), "*.tfstate".to_string()];
        let files = collect_files(tmp_dir.path(), &ignored).unwrap();
        assert_eq!(
            relative(tmp_dir.path(), &files),
            vec![".gitignore", ".hidden.tf", "main.tf", "modules/vlan.tf"]
        );
    }

    #[test]
    fn test_empty_directory() {
        let tmp_dir = Builder::new().prefix("test-expander").tempdir().unwrap();
        assert!(collect_files(tmp_dir.path(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let result = collect_files(Path::new("/no/such/terraform/dir"), &[]);
        assert!(result.is_err());
    }
}
