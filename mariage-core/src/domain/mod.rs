// mariage-core/src/domain/mod.rs

pub mod dimension;
pub mod error;
pub mod fact;
pub mod keys;
pub mod normalize;
pub mod project;
pub mod record;
pub mod table;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use normalize::{NormalizedValue, Normalizer, PLACEHOLDER};
