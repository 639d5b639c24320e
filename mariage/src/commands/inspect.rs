// mariage/src/commands/inspect.rs
//
// USE CASE: Inspect a loaded table (schema + sample rows).

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use duckdb::types::Value;
use duckdb::{Connection, Row};
use mariage_core::domain::table::LOAD_ORDER;
use mariage_core::infrastructure::config::load_project_config;
use std::path::{Path, PathBuf};

pub fn execute(
    project_dir: PathBuf,
    db_path: Option<String>,
    table: String,
    limit: usize,
) -> anyhow::Result<()> {
    let db_path = match db_path {
        Some(path) => path,
        None => {
            let config = load_project_config(&project_dir).with_context(|| {
                format!(
                    "Failed to load project configuration from {:?}",
                    project_dir
                )
            })?;
            super::database_path(&project_dir, &config, None)
        }
    };

    if !Path::new(&db_path).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'mariage load'?",
            db_path
        );
    }
    // Only known tables: the name is interpolated into SQL
    if !LOAD_ORDER.iter().any(|t| t.name == table) {
        let known: Vec<&str> = LOAD_ORDER.iter().map(|t| t.name).collect();
        anyhow::bail!("Unknown table '{}'. Expected one of: {}", table, known.join(", "));
    }

    let conn = Connection::open(&db_path)?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let mut stmt_cols = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let column_names: Vec<String> = stmt_cols
        .query_map([], |row: &Row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = Table::new();
    out.load_preset(UTF8_FULL);
    out.set_header(column_names.clone());

    let mut stmt = conn.prepare(&format!("SELECT * FROM {} LIMIT {}", table, limit))?;
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let values: Vec<String> = (0..column_names.len())
            .map(|i| match row.get::<_, Value>(i) {
                Ok(Value::Null) => "NULL".to_string(),
                Ok(Value::Text(s)) => s,
                Ok(Value::Int(n)) => n.to_string(),
                Ok(Value::BigInt(n)) => n.to_string(),
                Ok(val) => format!("{:?}", val),
                Err(_) => "ERROR".to_string(),
            })
            .collect();
        out.add_row(values);
    }

    println!("{out}");
    Ok(())
}
