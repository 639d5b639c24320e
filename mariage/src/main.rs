// mariage/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug mariage run ... pour voir chaque acte écarté
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir } => commands::run::execute(project_dir),
        Commands::Load {
            project_dir,
            db_path,
        } => commands::load::execute(project_dir, db_path),
        Commands::Inspect {
            project_dir,
            db_path,
            table,
            limit,
        } => commands::inspect::execute(project_dir, db_path, table, limit),
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
    }
}
