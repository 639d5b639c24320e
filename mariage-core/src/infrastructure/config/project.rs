// mariage-core/src/infrastructure/config/project.rs

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["mariage_project_conf.yaml", "mariage.yaml"];

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Chargement YAML
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read project config at {:?}", config_path))?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse project config YAML at {:?}", config_path))?;

    // 3. Override via Variables d'Environnement
    apply_env_overrides(&mut config);

    validate(&config)?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn apply_env_overrides(config: &mut ProjectConfig) {
    // MARIAGE_PROCESSED_PATH=/tmp/out mariage run
    if let Ok(val) = std::env::var("MARIAGE_PROCESSED_PATH") {
        info!(old = ?config.processed_path, new = ?val, "Overriding processed path via ENV");
        config.processed_path = val;
    }
    if let Ok(val) = std::env::var("MARIAGE_DATABASE_PATH") {
        info!(old = ?config.database_path, new = ?val, "Overriding database path via ENV");
        config.database_path = val;
    }
}

fn validate(config: &ProjectConfig) -> Result<(), InfrastructureError> {
    if config.reference.act_types.is_empty() {
        return Err(InfrastructureError::ConfigError(
            "reference.act-types must list at least one act type".into(),
        ));
    }
    if config.reference.departments.is_empty() {
        return Err(InfrastructureError::ConfigError(
            "reference.departments must list at least one department code".into(),
        ));
    }
    Ok(())
}
