// mariage-core/src/domain/dimension/department.rs

use crate::domain::project::ReferenceConfig;
use crate::domain::table::{DEPARTEMENT, TableSpec, Tabular};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub code: u32,
    pub name: String,
}

impl Tabular for Department {
    const TABLE: TableSpec = DEPARTEMENT;

    fn cells(&self) -> Vec<String> {
        vec![self.code.to_string(), self.name.clone()]
    }
}

/// One row per whitelisted code, ascending. Does not look at the source.
pub fn build_departments(reference: &ReferenceConfig) -> Vec<Department> {
    let mut codes = reference.departments.clone();
    codes.sort_unstable();
    codes.dedup();

    codes
        .into_iter()
        .map(|code| Department {
            code,
            name: reference.department_display_name(code),
        })
        .collect()
}
