// mariage-core/src/domain/dimension/commune.rs

use crate::domain::dimension::Dimension;
use crate::domain::error::DomainError;
use crate::domain::keys::{KeyAssigner, SurrogateKey};
use crate::domain::normalize::{NormalizedValue, Normalizer};
use crate::domain::project::ReferenceConfig;
use crate::domain::record::RawRecord;
use crate::domain::table::{COMMUNE, TableSpec, Tabular};

/// Natural key of a commune: cleaned name plus integer department code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommuneKey {
    pub name: NormalizedValue,
    pub department: u32,
}

impl CommuneKey {
    /// Key for a source row, or `None` when the row has no department code.
    pub fn from_record(
        record: &RawRecord,
        normalizer: &Normalizer,
    ) -> Result<Option<Self>, DomainError> {
        let Some(department) = normalizer.department_code(record.department.as_deref())? else {
            return Ok(None);
        };
        Ok(Some(Self {
            name: normalizer.normalize(record.commune.as_deref()),
            department,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commune {
    pub id: SurrogateKey,
    pub name: NormalizedValue,
    pub department: u32,
}

impl Tabular for Commune {
    const TABLE: TableSpec = COMMUNE;

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.to_string(),
            self.department.to_string(),
        ]
    }
}

/// Communes of whitelisted departments, numbered in first-seen source order.
///
/// A malformed department code anywhere in the source aborts the build.
pub fn build_communes(
    records: &[RawRecord],
    normalizer: &Normalizer,
    reference: &ReferenceConfig,
) -> Result<Dimension<Commune, CommuneKey>, DomainError> {
    let mut keys = KeyAssigner::new();
    let mut rows = Vec::new();

    for record in records {
        let Some(key) = CommuneKey::from_record(record, normalizer)? else {
            continue;
        };
        if !reference.is_valid_department(key.department) {
            continue;
        }

        let (id, fresh) = keys.assign(&key);
        if fresh {
            rows.push(Commune {
                id,
                name: key.name,
                department: key.department,
            });
        }
    }

    Ok(Dimension {
        rows,
        lookup: keys.into_lookup(),
    })
}
