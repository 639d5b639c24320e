// mariage-core/src/application/clean.rs

use std::fs;
use std::path::Path;

use crate::domain::project::ProjectConfig;
use crate::error::MariageError;

/// Removes generated artifacts listed in `clean-targets`. Returns the removed paths.
pub fn clean_project(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<Vec<String>, MariageError> {
    tracing::info!("🧹 Removing generated tables...");

    let mut removed = Vec::new();
    for target_rel_path in &config.clean_targets {
        let target = Path::new(target_rel_path);

        // Path traversal guard: relative, no '..'
        if target.is_absolute()
            || target
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(MariageError::UnsafePath(target_rel_path.clone()));
        }

        let full_path = project_dir.join(target);
        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            tracing::info!(path = %target_rel_path, "Artifact removed");
            removed.push(target_rel_path.clone());
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_removes_processed_dir_only() -> Result<()> {
        let dir = tempdir()?;
        let config = ProjectConfig::named("test");
        fs::create_dir_all(dir.path().join("data/processed"))?;
        fs::create_dir_all(dir.path().join("data/raw"))?;
        fs::write(dir.path().join("data/processed/personne.csv"), "id\n")?;

        let removed = clean_project(dir.path(), &config)?;

        assert_eq!(removed, vec!["data/processed".to_string()]);
        assert!(!dir.path().join("data/processed").exists());
        assert!(dir.path().join("data/raw").exists());
        Ok(())
    }

    #[test]
    fn test_refuses_traversal() -> Result<()> {
        let dir = tempdir()?;
        let mut config = ProjectConfig::named("test");
        config.clean_targets = vec!["../elsewhere".into()];

        let err = clean_project(dir.path(), &config).unwrap_err();
        assert!(matches!(err, MariageError::UnsafePath(_)));
        Ok(())
    }
}
