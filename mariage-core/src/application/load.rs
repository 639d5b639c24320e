// mariage-core/src/application/load.rs

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domain::table::{LOAD_ORDER, TableSpec};
use crate::error::MariageError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::loader::BulkLoader;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: String,
    pub rows: u64,
}

/// Loads the five table files of `processed_dir` into the store, dimensions first.
///
/// Every file must exist before anything is touched. The schema reset and all
/// copies run in one transaction; any failure rolls the whole load back.
#[instrument(skip(loader), fields(engine = loader.engine_name()))]
pub fn load_tables(
    loader: &mut dyn BulkLoader,
    processed_dir: &Path,
) -> Result<Vec<LoadedTable>, MariageError> {
    let start = Instant::now();

    let mut files = Vec::with_capacity(LOAD_ORDER.len());
    for table in LOAD_ORDER {
        let path = processed_dir.join(table.file_name());
        if !path.is_file() {
            return Err(InfrastructureError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Table file not found: {:?} (run the pipeline first)", path),
            ))
            .into());
        }
        files.push((table, path));
    }

    loader.begin()?;
    let result = copy_all(loader, &files);
    match result {
        Ok(loaded) => {
            loader.commit()?;
            info!(elapsed = ?start.elapsed(), "Bulk load committed");
            Ok(loaded)
        }
        Err(e) => {
            error!("❌ Bulk load failed, rolling back: {}", e);
            loader.rollback()?;
            Err(e)
        }
    }
}

fn copy_all(
    loader: &mut dyn BulkLoader,
    files: &[(TableSpec, PathBuf)],
) -> Result<Vec<LoadedTable>, MariageError> {
    loader.reset_schema()?;

    let mut loaded = Vec::with_capacity(files.len());
    for (table, path) in files {
        loader.copy_table(table, path)?;
        let rows = loader.row_count(table)?;
        info!(table = table.name, rows, "Table loaded");
        loaded.push(LoadedTable {
            table: table.name.to_string(),
            rows,
        });
    }
    Ok(loaded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    /// Records calls instead of talking to a database.
    #[derive(Default)]
    struct RecordingLoader {
        calls: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl BulkLoader for RecordingLoader {
        fn reset_schema(&mut self) -> Result<(), MariageError> {
            self.calls.push("reset".into());
            Ok(())
        }

        fn copy_table(&mut self, table: &TableSpec, _path: &Path) -> Result<(), MariageError> {
            if self.fail_on == Some(table.name) {
                return Err(MariageError::InternalError(format!("copy {}", table.name)));
            }
            self.calls.push(format!("copy {}", table.name));
            Ok(())
        }

        fn row_count(&self, _table: &TableSpec) -> Result<u64, MariageError> {
            Ok(1)
        }

        fn begin(&mut self) -> Result<(), MariageError> {
            self.calls.push("begin".into());
            Ok(())
        }

        fn commit(&mut self) -> Result<(), MariageError> {
            self.calls.push("commit".into());
            Ok(())
        }

        fn rollback(&mut self) -> Result<(), MariageError> {
            self.calls.push("rollback".into());
            Ok(())
        }

        fn engine_name(&self) -> &str {
            "recording"
        }
    }

    fn processed_dir() -> Result<(tempfile::TempDir, PathBuf)> {
        let dir = tempdir()?;
        let out = dir.path().join("processed");
        fs::create_dir_all(&out)?;
        for table in LOAD_ORDER {
            fs::write(out.join(table.file_name()), table.columns.join(";") + "\n")?;
        }
        Ok((dir, out))
    }

    #[test]
    fn test_loads_in_dependency_order() -> Result<()> {
        let (_dir, out) = processed_dir()?;
        let mut loader = RecordingLoader::default();

        let loaded = load_tables(&mut loader, &out)?;

        assert_eq!(loaded.len(), 5);
        assert_eq!(
            loader.calls,
            vec![
                "begin",
                "reset",
                "copy type_acte",
                "copy departement",
                "copy commune",
                "copy personne",
                "copy acte_mariage",
                "commit"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_file_aborts_before_touching_store() -> Result<()> {
        let (_dir, out) = processed_dir()?;
        fs::remove_file(out.join("personne.csv"))?;
        let mut loader = RecordingLoader::default();

        let err = load_tables(&mut loader, &out).unwrap_err();
        assert!(err.to_string().contains("personne.csv"));
        assert!(loader.calls.is_empty());
        Ok(())
    }

    #[test]
    fn test_copy_failure_rolls_back() -> Result<()> {
        let (_dir, out) = processed_dir()?;
        let mut loader = RecordingLoader {
            fail_on: Some("commune"),
            ..RecordingLoader::default()
        };

        assert!(load_tables(&mut loader, &out).is_err());
        assert_eq!(loader.calls.last().map(String::as_str), Some("rollback"));
        assert!(!loader.calls.contains(&"commit".to_string()));
        Ok(())
    }
}
