// mariage-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "raw-path", default = "default_raw_path")]
    pub raw_path: String,

    #[serde(rename = "source-file", default = "default_source_file")]
    pub source_file: String,

    #[serde(rename = "processed-path", default = "default_processed_path")]
    pub processed_path: String,

    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    #[serde(default)]
    pub reference: ReferenceConfig,
}

impl ProjectConfig {
    /// Minimal configuration with every default applied.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: default_version(),
            raw_path: default_raw_path(),
            source_file: default_source_file(),
            processed_path: default_processed_path(),
            database_path: default_database_path(),
            clean_targets: default_clean_targets(),
            reference: ReferenceConfig::default(),
        }
    }
}

/// Static reference lists: which act types and departments are kept, and which raw
/// tokens mean "no value".
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReferenceConfig {
    #[serde(rename = "act-types", default = "default_act_types")]
    pub act_types: Vec<String>,

    #[serde(default = "default_departments")]
    pub departments: Vec<u32>,

    #[serde(rename = "invalid-values", default = "default_invalid_values")]
    pub invalid_values: Vec<String>,

    /// Template for the department display name; `{code}` is substituted.
    #[serde(rename = "department-name", default = "default_department_name")]
    pub department_name: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            act_types: default_act_types(),
            departments: default_departments(),
            invalid_values: default_invalid_values(),
            department_name: default_department_name(),
        }
    }
}

impl ReferenceConfig {
    pub fn is_valid_act_type(&self, label: &str) -> bool {
        self.act_types.iter().any(|t| t == label)
    }

    pub fn is_valid_department(&self, code: u32) -> bool {
        self.departments.contains(&code)
    }

    pub fn department_display_name(&self, code: u32) -> String {
        self.department_name.replace("{code}", &code.to_string())
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_raw_path() -> String {
    "data/raw".to_string()
}
fn default_source_file() -> String {
    "mariages_L3.csv".to_string()
}
fn default_processed_path() -> String {
    "data/processed".to_string()
}
fn default_database_path() -> String {
    "mariage.duckdb".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["data/processed".to_string()]
}
fn default_department_name() -> String {
    "Département {code}".to_string()
}

fn default_act_types() -> Vec<String> {
    [
        "Certificat de mariage",
        "Contrat de mariage",
        "Divorce",
        "Mariage",
        "Promesse de mariage - fiançailles",
        "Publication de mariage",
        "Rectification de mariage",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_departments() -> Vec<u32> {
    vec![44, 49, 79, 85]
}

fn default_invalid_values() -> Vec<String> {
    ["n/a", "na", "nan", "none", "", "..."]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
