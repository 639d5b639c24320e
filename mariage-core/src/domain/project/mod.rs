pub mod configuration;

pub use configuration::{ProjectConfig, ReferenceConfig};
