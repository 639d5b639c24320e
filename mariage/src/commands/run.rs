// mariage/src/commands/run.rs
//
// USE CASE: Clean the raw acts and write every table.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use mariage_core::MariageError;
use mariage_core::application::{RunResult, run_pipeline};
use mariage_core::infrastructure::config::load_project_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    println!("🚀 Normalizing {}/{}...", config.raw_path, config.source_file);
    match run_pipeline(&project_dir, &config) {
        Ok(result) => {
            print_summary(&result);
            println!("\n✨ SUCCESS! Tables written in {:.2?}", start.elapsed());
        }
        Err(MariageError::Domain(e)) => {
            eprintln!("{:?}", miette::Report::new(e));
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: source data rejected");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Table", "Rows", "File"]);
    for t in &result.tables {
        table.add_row(vec![
            t.table.clone(),
            t.rows.to_string(),
            t.path.display().to_string(),
        ]);
    }
    println!("{table}");

    let r = &result.resolution;
    println!(
        "   Source rows: {} | filtered: {} | accepted acts: {}",
        result.source_rows, r.rows_filtered, r.rows_accepted
    );
    if r.dropped() > 0 {
        println!(
            "   ⚠️  {} acts dropped (type: {}, person a: {}, person b: {}, commune: {})",
            r.dropped(),
            r.dropped_type,
            r.dropped_person_a,
            r.dropped_person_b,
            r.dropped_commune
        );
    }
}
