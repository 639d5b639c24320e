// mariage-core/src/ports/mod.rs

pub mod loader;

pub use loader::BulkLoader;
