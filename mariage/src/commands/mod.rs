// mariage/src/commands/mod.rs

pub mod clean;
pub mod inspect;
pub mod load;
pub mod run;

use std::path::Path;

use mariage_core::infrastructure::config::ProjectConfig;

/// `--db-path` when given, otherwise the project's `database-path` under `project_dir`.
pub fn database_path(project_dir: &Path, config: &ProjectConfig, db_path: Option<String>) -> String {
    db_path.unwrap_or_else(|| {
        project_dir
            .join(&config.database_path)
            .to_string_lossy()
            .to_string()
    })
}
