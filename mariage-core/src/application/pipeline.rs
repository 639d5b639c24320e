// mariage-core/src/application/pipeline.rs

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::MariageError;

// Domain
use crate::domain::dimension::{
    ActType, Commune, Department, Person, build_act_types, build_communes, build_departments,
    resolve_persons,
};
use crate::domain::error::DomainError;
use crate::domain::fact::{FactResolver, MarriageFact, ResolutionReport};
use crate::domain::normalize::Normalizer;
use crate::domain::project::{ProjectConfig, ReferenceConfig};
use crate::domain::record::RawRecord;
use crate::domain::table::Tabular;

// Infrastructure
use crate::infrastructure::fs::{atomic_write, ensure_dir};
use crate::infrastructure::source::SourceLoader;
use crate::infrastructure::writer::TableWriter;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub table: String,
    pub rows: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub finished_at: String,
    pub source_rows: usize,
    pub tables: Vec<TableSummary>,
    pub resolution: ResolutionReport,
}

/// Every table of one run, fully computed and not yet written.
#[derive(Debug, Clone)]
pub struct Batch {
    pub act_types: Vec<ActType>,
    pub departments: Vec<Department>,
    pub communes: Vec<Commune>,
    pub persons: Vec<Person>,
    pub facts: Vec<MarriageFact>,
    pub report: ResolutionReport,
}

/// Builds the dimensions and resolves the facts of one batch in memory.
///
/// The lookups produced by the dimension builders are handed straight to the
/// fact resolver. Nothing is read back from disk.
pub fn process_records(
    records: &[RawRecord],
    normalizer: &Normalizer,
    reference: &ReferenceConfig,
) -> Result<Batch, DomainError> {
    let act_types = build_act_types(records, normalizer, reference);
    info!(rows = act_types.len(), "Act types built");

    let departments = build_departments(reference);

    let communes = build_communes(records, normalizer, reference)?;
    info!(rows = communes.len(), "Communes built");

    let persons = resolve_persons(records, normalizer);
    info!(rows = persons.len(), "Persons resolved");

    let resolver = FactResolver {
        normalizer,
        reference,
        act_types: &act_types.lookup,
        persons: &persons.lookup,
        communes: &communes.lookup,
    };
    let (facts, report) = resolver.resolve(records)?;

    if report.dropped() > 0 {
        warn!(
            dropped = report.dropped(),
            missing_type = report.dropped_type,
            missing_person_a = report.dropped_person_a,
            missing_person_b = report.dropped_person_b,
            missing_commune = report.dropped_commune,
            "Acts dropped: unresolved dimension references"
        );
    }
    info!(rows = facts.len(), "Marriage acts resolved");

    Ok(Batch {
        act_types: act_types.rows,
        departments,
        communes: communes.rows,
        persons: persons.rows,
        facts,
        report,
    })
}

/// Runs the whole batch: read the raw file, build every table, write them out.
///
/// All tables are computed before the first file is written, so a fatal error
/// leaves the previous outputs in place.
#[instrument(skip(config), fields(project = %config.name))]
pub fn run_pipeline(project_dir: &Path, config: &ProjectConfig) -> Result<RunResult, MariageError> {
    let start_time = Instant::now();

    let source_path = project_dir.join(&config.raw_path).join(&config.source_file);
    let output_dir = project_dir.join(&config.processed_path);

    info!(path = ?source_path, "Reading source file");
    let records = SourceLoader::new().load_file(&source_path)?;

    let normalizer = Normalizer::new(&config.reference.invalid_values);
    let batch = process_records(&records, &normalizer, &config.reference)?;

    ensure_dir(&output_dir)?;
    let writer = TableWriter::new(&output_dir, &normalizer);
    let tables = vec![
        write_table(&writer, &batch.act_types)?,
        write_table(&writer, &batch.departments)?,
        write_table(&writer, &batch.communes)?,
        write_table(&writer, &batch.persons)?,
        write_table(&writer, &batch.facts)?,
    ];

    let result = RunResult {
        finished_at: chrono::Utc::now().to_rfc3339(),
        source_rows: records.len(),
        tables,
        resolution: batch.report,
    };
    save_json(&output_dir.join(RUN_RESULTS_FILE), &result)?;

    info!(elapsed = ?start_time.elapsed(), "Pipeline finished");
    Ok(result)
}

fn write_table<T: Tabular>(writer: &TableWriter, rows: &[T]) -> Result<TableSummary, MariageError> {
    let path = writer.write_entities(rows)?;
    info!(table = T::TABLE.name, rows = rows.len(), "Table written");
    Ok(TableSummary {
        table: T::TABLE.name.to_string(),
        rows: rows.len(),
        path,
    })
}

fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), MariageError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| MariageError::InternalError(format!("Serialization: {}", e)))?;
    atomic_write(path, content)?;
    Ok(())
}
