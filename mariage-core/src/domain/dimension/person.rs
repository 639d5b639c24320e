// mariage-core/src/domain/dimension/person.rs

use crate::domain::dimension::Dimension;
use crate::domain::keys::{KeyAssigner, SurrogateKey};
use crate::domain::normalize::{NormalizedValue, Normalizer};
use crate::domain::record::{RawPerson, RawRecord, Role};
use crate::domain::table::{PERSONNE, TableSpec, Tabular};

/// Composite identity of a person. Two persons are the same iff all five
/// normalized fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonIdentity {
    pub surname: NormalizedValue,
    pub given_name: NormalizedValue,
    pub father_given_name: NormalizedValue,
    pub mother_surname: NormalizedValue,
    pub mother_given_name: NormalizedValue,
}

impl PersonIdentity {
    pub fn from_raw(raw: &RawPerson, normalizer: &Normalizer) -> Self {
        Self {
            surname: normalizer.normalize(raw.surname.as_deref()),
            given_name: normalizer.normalize(raw.given_name.as_deref()),
            father_given_name: normalizer.normalize(raw.father_given_name.as_deref()),
            mother_surname: normalizer.normalize(raw.mother_surname.as_deref()),
            mother_given_name: normalizer.normalize(raw.mother_given_name.as_deref()),
        }
    }

    /// Only persons with both a surname and a given name enter the dimension.
    pub fn is_eligible(&self) -> bool {
        !self.surname.is_unspecified() && !self.given_name.is_unspecified()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: SurrogateKey,
    pub identity: PersonIdentity,
}

impl Tabular for Person {
    const TABLE: TableSpec = PERSONNE;

    fn cells(&self) -> Vec<String> {
        let p = &self.identity;
        vec![
            self.id.to_string(),
            p.surname.to_string(),
            p.given_name.to_string(),
            p.father_given_name.to_string(),
            p.mother_surname.to_string(),
            p.mother_given_name.to_string(),
        ]
    }
}

/// Deduplicates persons across both role slots of every row.
///
/// Rows are scanned in source order, role A before role B; each new eligible
/// identity gets the next id.
pub fn resolve_persons(
    records: &[RawRecord],
    normalizer: &Normalizer,
) -> Dimension<Person, PersonIdentity> {
    let mut keys = KeyAssigner::new();
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in records {
        for role in Role::ALL {
            let identity = PersonIdentity::from_raw(record.person(role), normalizer);
            if !identity.is_eligible() {
                skipped += 1;
                continue;
            }
            let (id, fresh) = keys.assign(&identity);
            if fresh {
                rows.push(Person { id, identity });
            }
        }
    }

    tracing::debug!(
        persons = rows.len(),
        skipped_slots = skipped,
        "Person identities resolved"
    );

    Dimension {
        rows,
        lookup: keys.into_lookup(),
    }
}
