// mariage-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Malformed department code: '{0}'")]
    #[diagnostic(
        code(mariage::domain::department_code),
        help("Department codes must be numeric (e.g. '44' or '44.0').")
    )]
    MalformedDepartmentCode(String),

    #[error("Source row {line} has {found} fields, expected at most {expected}")]
    #[diagnostic(
        code(mariage::domain::column_count),
        help("The source file is headerless with a fixed set of positional columns.")
    )]
    ColumnCount {
        line: u64,
        found: usize,
        expected: usize,
    },
}
