// mariage/src/commands/clean.rs
//
// USE CASE: Remove generated tables.

use std::path::PathBuf;

use mariage_core::application::clean_project;
use mariage_core::infrastructure::config::load_project_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir)?;
    match clean_project(&project_dir, &config) {
        Ok(removed) => {
            for path in removed {
                println!("   🗑️  Artifact removed: {}", path);
            }
        }
        Err(e) => {
            eprintln!("❌ Clean failed: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
