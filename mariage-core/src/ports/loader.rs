// mariage-core/src/ports/loader.rs

// What the pipeline needs from the relational store, without knowing which one.
// The store receives finished table files; it never sees in-memory rows.

use std::path::Path;

use crate::domain::table::TableSpec;
use crate::error::MariageError;

pub trait BulkLoader {
    /// Drops and recreates every table. A load is always a full recompute.
    fn reset_schema(&mut self) -> Result<(), MariageError>;

    /// Streams one table file into its table, using the shared text conventions.
    fn copy_table(&mut self, table: &TableSpec, path: &Path) -> Result<(), MariageError>;

    fn row_count(&self, table: &TableSpec) -> Result<u64, MariageError>;

    fn begin(&mut self) -> Result<(), MariageError>;

    fn commit(&mut self) -> Result<(), MariageError>;

    fn rollback(&mut self) -> Result<(), MariageError>;

    fn engine_name(&self) -> &str;
}
