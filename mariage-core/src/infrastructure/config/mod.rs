pub mod project;

pub use crate::domain::project::{ProjectConfig, ReferenceConfig};
pub use project::load_project_config;
