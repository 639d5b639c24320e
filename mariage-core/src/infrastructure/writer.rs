// mariage-core/src/infrastructure/writer.rs

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use tracing::{debug, instrument};

use crate::domain::normalize::Normalizer;
use crate::domain::table::{TABLE_FORMAT, TableSpec, Tabular};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write_with;

/// Serializes tables to `;`-delimited text for the bulk loader.
///
/// Every cell goes through the normalizer again on the way out, so the files only
/// ever contain canonical values or the placeholder. Files are replaced atomically.
#[derive(Debug, Clone)]
pub struct TableWriter<'a> {
    output_dir: PathBuf,
    normalizer: &'a Normalizer,
}

impl<'a> TableWriter<'a> {
    pub fn new(output_dir: impl Into<PathBuf>, normalizer: &'a Normalizer) -> Self {
        Self {
            output_dir: output_dir.into(),
            normalizer,
        }
    }

    pub fn path_for(&self, table: &TableSpec) -> PathBuf {
        self.output_dir.join(table.file_name())
    }

    /// Writes `rows` to `<output_dir>/<table>.csv` and returns the path.
    pub fn write_entities<T: Tabular>(&self, rows: &[T]) -> Result<PathBuf, InfrastructureError> {
        let path = self.path_for(&T::TABLE);
        self.write(&path, T::TABLE.columns, rows.iter().map(T::cells))?;
        Ok(path)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write<I, R, S>(
        &self,
        path: &Path,
        headers: &[&str],
        rows: I,
    ) -> Result<usize, InfrastructureError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut written = 0usize;

        atomic_write_with(path, |out| {
            let mut writer = WriterBuilder::new()
                .delimiter(TABLE_FORMAT.delimiter)
                .quote(TABLE_FORMAT.quote)
                .escape(TABLE_FORMAT.escape)
                .double_quote(false)
                .quote_style(QuoteStyle::Necessary)
                .from_writer(out);

            if TABLE_FORMAT.header {
                writer.write_record(headers)?;
            }
            for row in rows {
                let cleaned: Vec<String> = row
                    .into_iter()
                    .map(|cell| escape_cell(self.normalizer.normalize_str(cell.as_ref()).as_str()))
                    .collect();
                writer.write_record(&cleaned)?;
                written += 1;
            }
            writer.flush()?;
            Ok(())
        })?;

        debug!(rows = written, "Table written");
        Ok(written)
    }
}

/// The csv writer escapes quotes but not the escape byte itself. Doubling it keeps
/// a literal backslash from swallowing the next byte (or the closing quote) on read.
/// Fields holding the escape byte are always quoted, which is where readers honour it.
fn escape_cell(value: &str) -> String {
    let escape = TABLE_FORMAT.escape as char;
    let mut doubled = String::with_capacity(2);
    doubled.push(escape);
    doubled.push(escape);
    value.replace(escape, &doubled)
}
