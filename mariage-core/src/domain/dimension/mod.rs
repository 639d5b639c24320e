// mariage-core/src/domain/dimension/mod.rs

pub mod act_type;
pub mod commune;
pub mod department;
pub mod person;

use std::collections::HashMap;

use crate::domain::keys::SurrogateKey;

pub use act_type::{ActType, build_act_types};
pub use commune::{Commune, CommuneKey, build_communes};
pub use department::{Department, build_departments};
pub use person::{Person, PersonIdentity, resolve_persons};

/// A built dimension: its rows in id order, plus the natural-key -> id lookup
/// handed to the fact resolver.
#[derive(Debug, Clone)]
pub struct Dimension<T, K> {
    pub rows: Vec<T>,
    pub lookup: HashMap<K, SurrogateKey>,
}

impl<T, K> Dimension<T, K> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
