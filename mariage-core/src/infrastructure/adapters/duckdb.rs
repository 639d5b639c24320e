// mariage-core/src/infrastructure/adapters/duckdb.rs

use std::path::Path;

use duckdb::{Config, Connection};
use tracing::debug;

use crate::domain::table::{LOAD_ORDER, TABLE_FORMAT, TableSpec};
use crate::error::MariageError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::loader::BulkLoader;

/// Target schema. Surrogate keys are integers; every free-text column is
/// nullable since the placeholder loads as NULL.
const SCHEMA_DDL: &str = r#"
CREATE TABLE type_acte (
    id INTEGER PRIMARY KEY,
    libelle VARCHAR NOT NULL
);
CREATE TABLE departement (
    code INTEGER PRIMARY KEY,
    nom VARCHAR NOT NULL
);
CREATE TABLE commune (
    id INTEGER PRIMARY KEY,
    nom VARCHAR,
    dept_code INTEGER NOT NULL REFERENCES departement(code)
);
CREATE TABLE personne (
    id INTEGER PRIMARY KEY,
    nom VARCHAR NOT NULL,
    prenom VARCHAR NOT NULL,
    prenom_pere VARCHAR,
    nom_mere VARCHAR,
    prenom_mere VARCHAR
);
CREATE TABLE acte_mariage (
    id VARCHAR,
    type_id INTEGER NOT NULL REFERENCES type_acte(id),
    personne_a_id INTEGER NOT NULL REFERENCES personne(id),
    personne_b_id INTEGER NOT NULL REFERENCES personne(id),
    commune_id INTEGER NOT NULL REFERENCES commune(id),
    date_acte VARCHAR,
    num_vue VARCHAR
);
"#;

fn db_err(e: duckdb::Error) -> MariageError {
    MariageError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
}

/// Renders the `COPY ... FROM` statement for a table file.
pub fn copy_statement(table: &TableSpec, path: &Path) -> String {
    let f = TABLE_FORMAT;
    format!(
        "COPY {} ({}) FROM '{}' (FORMAT CSV, DELIMITER '{}', QUOTE '{}', ESCAPE '{}', HEADER {}, NULL '{}')",
        table.name,
        table.columns.join(", "),
        path.to_string_lossy().replace('\'', "''"),
        f.delimiter as char,
        f.quote as char,
        f.escape as char,
        f.header,
        f.null_token,
    )
}

pub struct DuckDBLoader {
    conn: Connection,
}

impl DuckDBLoader {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self { conn })
    }

    fn execute_batch(&self, sql: &str) -> Result<(), MariageError> {
        debug!("⚡ Executing: {}", sql.trim());
        self.conn.execute_batch(sql).map_err(db_err)
    }
}

impl BulkLoader for DuckDBLoader {
    fn reset_schema(&mut self) -> Result<(), MariageError> {
        // Reverse load order so referencing tables go first
        let drops: String = LOAD_ORDER
            .iter()
            .rev()
            .map(|t| format!("DROP TABLE IF EXISTS {};\n", t.name))
            .collect();
        self.execute_batch(&drops)?;
        self.execute_batch(SCHEMA_DDL)
    }

    fn copy_table(&mut self, table: &TableSpec, path: &Path) -> Result<(), MariageError> {
        self.execute_batch(&copy_statement(table, path))
    }

    fn row_count(&self, table: &TableSpec) -> Result<u64, MariageError> {
        let query = format!("SELECT count(*) FROM {}", table.name);
        let count: i64 = self
            .conn
            .query_row(&query, [], |row| row.get(0))
            .map_err(db_err)?;
        u64::try_from(count).map_err(|e| MariageError::InternalError(e.to_string()))
    }

    fn begin(&mut self) -> Result<(), MariageError> {
        self.execute_batch("BEGIN TRANSACTION;")
    }

    fn commit(&mut self) -> Result<(), MariageError> {
        self.execute_batch("COMMIT;")
    }

    fn rollback(&mut self) -> Result<(), MariageError> {
        self.execute_batch("ROLLBACK;")
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
