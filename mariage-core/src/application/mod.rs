// mariage-core/src/application/mod.rs

pub mod clean;
pub mod load;
pub mod pipeline;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use mariage_core::application::{run_pipeline, load_tables, clean_project};`

pub use clean::clean_project;
pub use load::{LoadedTable, load_tables};
pub use pipeline::{RunResult, TableSummary, process_records, run_pipeline};
