// mariage/src/commands/load.rs
//
// USE CASE: Bulk-load the written tables into DuckDB.

use std::path::PathBuf;

use anyhow::Context;
use mariage_core::application::load_tables;
use mariage_core::infrastructure::adapters::DuckDBLoader;
use mariage_core::infrastructure::config::load_project_config;
use mariage_core::infrastructure::fs::ensure_dir;

pub fn execute(project_dir: PathBuf, db_path: Option<String>) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;

    let db_path = super::database_path(&project_dir, &config, db_path);
    let processed_dir = project_dir.join(&config.processed_path);

    if db_path != ":memory:"
        && let Some(parent) = std::path::Path::new(&db_path).parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent).with_context(|| format!("Cannot create {}", parent.display()))?;
    }

    println!("📥 Loading tables from {} into {} 🦆", processed_dir.display(), db_path);
    let mut loader = DuckDBLoader::new(&db_path)
        .with_context(|| format!("Failed to initialize DuckDB at {}", db_path))?;

    match load_tables(&mut loader, &processed_dir) {
        Ok(loaded) => {
            for t in &loaded {
                println!("   ✅ {:<14} {} rows", t.table, t.rows);
            }
            println!("✨ Load complete.");
        }
        Err(e) => {
            eprintln!("❌ Load failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
