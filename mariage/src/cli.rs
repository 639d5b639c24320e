// mariage/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mariage")]
#[command(about = "Normalizes raw marriage records into a loadable dimensional schema", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Cleans the raw acts and writes the dimension and fact tables
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📥 Bulk-loads the written tables into DuckDB
    Load {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Database file (defaults to `database-path` from the project file)
        #[arg(long)]
        db_path: Option<String>,
    },

    /// 🔍 Inspects a loaded table (schema + sample rows)
    Inspect {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Database file (defaults to `database-path` from the project file)
        #[arg(long)]
        db_path: Option<String>,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 🧹 Removes generated tables
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
