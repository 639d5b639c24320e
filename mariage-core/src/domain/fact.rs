// mariage-core/src/domain/fact.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::dimension::{CommuneKey, PersonIdentity};
use crate::domain::error::DomainError;
use crate::domain::keys::SurrogateKey;
use crate::domain::normalize::{NormalizedValue, Normalizer};
use crate::domain::project::ReferenceConfig;
use crate::domain::record::{RawRecord, Role};
use crate::domain::table::{ACTE_MARIAGE, TableSpec, Tabular};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarriageFact {
    /// Act id carried over from the source row.
    pub id: NormalizedValue,
    pub type_id: SurrogateKey,
    pub person_a_id: SurrogateKey,
    pub person_b_id: SurrogateKey,
    pub commune_id: SurrogateKey,
    pub act_date: NormalizedValue,
    pub page_number: NormalizedValue,
}

impl Tabular for MarriageFact {
    const TABLE: TableSpec = ACTE_MARIAGE;

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.type_id.to_string(),
            self.person_a_id.to_string(),
            self.person_b_id.to_string(),
            self.commune_id.to_string(),
            self.act_date.to_string(),
            self.page_number.to_string(),
        ]
    }
}

/// Which dimension lookup a dropped row failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    ActType,
    PersonA,
    PersonB,
    Commune,
}

/// Counters describing what happened to each source row during fact resolution.
///
/// Rows that miss several lookups are counted once, under the first miss in
/// the order type, person a, person b, commune.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub rows_considered: usize,
    pub rows_filtered: usize,
    pub rows_accepted: usize,
    pub dropped_type: usize,
    pub dropped_person_a: usize,
    pub dropped_person_b: usize,
    pub dropped_commune: usize,
}

impl ResolutionReport {
    pub fn dropped(&self) -> usize {
        self.dropped_type + self.dropped_person_a + self.dropped_person_b + self.dropped_commune
    }

    fn record_miss(&mut self, miss: LookupMiss) {
        match miss {
            LookupMiss::ActType => self.dropped_type += 1,
            LookupMiss::PersonA => self.dropped_person_a += 1,
            LookupMiss::PersonB => self.dropped_person_b += 1,
            LookupMiss::Commune => self.dropped_commune += 1,
        }
    }
}

/// Borrowed view of the dimension lookups a fact row is resolved against.
pub struct FactResolver<'a> {
    pub normalizer: &'a Normalizer,
    pub reference: &'a ReferenceConfig,
    pub act_types: &'a HashMap<String, SurrogateKey>,
    pub persons: &'a HashMap<PersonIdentity, SurrogateKey>,
    pub communes: &'a HashMap<CommuneKey, SurrogateKey>,
}

impl FactResolver<'_> {
    /// Resolves every eligible row, keeping source order.
    ///
    /// A row is eligible when its type label and department code are both
    /// whitelisted. An eligible row is emitted only if all four lookups succeed;
    /// otherwise it is dropped and counted, never reported as an error.
    pub fn resolve(
        &self,
        records: &[RawRecord],
    ) -> Result<(Vec<MarriageFact>, ResolutionReport), DomainError> {
        let mut facts = Vec::new();
        let mut report = ResolutionReport {
            rows_considered: records.len(),
            ..ResolutionReport::default()
        };

        for (index, record) in records.iter().enumerate() {
            if !self.is_eligible(record)? {
                report.rows_filtered += 1;
                continue;
            }
            match self.resolve_row(record)? {
                Ok(fact) => {
                    facts.push(fact);
                    report.rows_accepted += 1;
                }
                Err(miss) => {
                    debug!(row = index + 1, act_id = ?record.id, ?miss, "Dropping act");
                    report.record_miss(miss);
                }
            }
        }

        Ok((facts, report))
    }

    fn is_eligible(&self, record: &RawRecord) -> Result<bool, DomainError> {
        let label = self.normalizer.normalize(record.act_type.as_deref());
        if !self.reference.is_valid_act_type(label.as_str()) {
            return Ok(false);
        }
        let department = self.normalizer.department_code(record.department.as_deref())?;
        Ok(department.is_some_and(|code| self.reference.is_valid_department(code)))
    }

    /// Outer error: fatal. Inner error: the row is dropped.
    fn resolve_row(
        &self,
        record: &RawRecord,
    ) -> Result<Result<MarriageFact, LookupMiss>, DomainError> {
        let label = self.normalizer.normalize(record.act_type.as_deref());
        let Some(&type_id) = self.act_types.get(label.as_str()) else {
            return Ok(Err(LookupMiss::ActType));
        };

        let Some(person_a_id) = self.person_id(record, Role::A) else {
            return Ok(Err(LookupMiss::PersonA));
        };
        let Some(person_b_id) = self.person_id(record, Role::B) else {
            return Ok(Err(LookupMiss::PersonB));
        };

        let commune_id = CommuneKey::from_record(record, self.normalizer)?
            .and_then(|key| self.communes.get(&key).copied());
        let Some(commune_id) = commune_id else {
            return Ok(Err(LookupMiss::Commune));
        };

        Ok(Ok(MarriageFact {
            id: self.normalizer.normalize(record.id.as_deref()),
            type_id,
            person_a_id,
            person_b_id,
            commune_id,
            act_date: self.normalizer.normalize(record.act_date.as_deref()),
            page_number: self.normalizer.normalize(record.page_number.as_deref()),
        }))
    }

    fn person_id(&self, record: &RawRecord, role: Role) -> Option<SurrogateKey> {
        let identity = PersonIdentity::from_raw(record.person(role), self.normalizer);
        self.persons.get(&identity).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dimension::{build_act_types, build_communes, resolve_persons};
    use anyhow::Result;

    #[allow(clippy::too_many_arguments)]
    fn row(
        id: &str,
        act_type: &str,
        a: (&str, &str),
        b: (&str, &str),
        commune: &str,
        dept: &str,
        date: &str,
        page: &str,
    ) -> RawRecord {
        RawRecord::from_fields([
            id, act_type, a.0, a.1, "", "", "", b.0, b.1, "", "", "", commune, dept, date, page,
        ])
    }

    fn resolve(records: &[RawRecord]) -> Result<(Vec<MarriageFact>, ResolutionReport)> {
        let normalizer = Normalizer::default();
        let reference = ReferenceConfig::default();
        let types = build_act_types(records, &normalizer, &reference);
        let persons = resolve_persons(records, &normalizer);
        let communes = build_communes(records, &normalizer, &reference)?;
        let resolver = FactResolver {
            normalizer: &normalizer,
            reference: &reference,
            act_types: &types.lookup,
            persons: &persons.lookup,
            communes: &communes.lookup,
        };
        Ok(resolver.resolve(records)?)
    }

    #[test]
    fn test_fully_resolved_row_keeps_source_id() -> Result<()> {
        let records = vec![row(
            "907",
            "Mariage",
            ("DUPONT", "Jean"),
            ("DURAND", "Marie"),
            "Nantes",
            "44",
            "12/05/1851",
            "14",
        )];
        let (facts, report) = resolve(&records)?;
        assert_eq!(facts.len(), 1);
        let fact = &facts[0];
        assert_eq!(fact.id.as_str(), "907");
        assert_eq!((fact.type_id, fact.person_a_id, fact.person_b_id), (1, 1, 2));
        assert_eq!(fact.commune_id, 1);
        assert_eq!(fact.act_date.as_str(), "12/05/1851");
        assert_eq!(report.rows_accepted, 1);
        assert_eq!(report.dropped(), 0);
        Ok(())
    }

    #[test]
    fn test_padded_type_label_matches_whitelist() -> Result<()> {
        let records = vec![
            row("1", "Mariage", ("DUPONT", "Jean"), ("DURAND", "Marie"), "Nantes", "44", "", ""),
            row("2", "  Mariage ", ("LEROY", "Luc"), ("MOREAU", "Léa"), "Nantes", "44", "", ""),
        ];
        let (facts, report) = resolve(&records)?;
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].type_id, facts[1].type_id);
        assert_eq!(report.rows_filtered, 0);
        Ok(())
    }

    #[test]
    fn test_unlisted_type_is_filtered() -> Result<()> {
        let records = vec![row(
            "1",
            "Divorce pur et simple",
            ("DUPONT", "Jean"),
            ("DURAND", "Marie"),
            "Nantes",
            "44",
            "1850",
            "1",
        )];
        let (facts, report) = resolve(&records)?;
        assert!(facts.is_empty());
        assert_eq!(report.rows_filtered, 1);
        assert_eq!(report.dropped(), 0);
        Ok(())
    }

    #[test]
    fn test_unresolved_person_drops_row_silently() -> Result<()> {
        let records = vec![
            row("1", "Mariage", ("DUPONT", "Jean"), ("", "Marie"), "Nantes", "44", "", ""),
            row("2", "Mariage", ("n/a", "Paul"), ("DURAND", "Marie"), "Nantes", "44", "", ""),
            row("3", "Mariage", ("LEROY", "Luc"), ("MOREAU", "Léa"), "Cholet", "49.0", "", ""),
        ];
        let (facts, report) = resolve(&records)?;
        let ids: Vec<&str> = facts.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
        assert_eq!(report.dropped_person_b, 1);
        assert_eq!(report.dropped_person_a, 1);
        assert_eq!(report.rows_accepted, 1);
        Ok(())
    }

    #[test]
    fn test_missing_optional_fields_become_placeholder() -> Result<()> {
        let records = vec![row(
            "5",
            "Mariage",
            ("DUPONT", "Jean"),
            ("DURAND", "Marie"),
            "Nantes",
            "44",
            "",
            "n/a",
        )];
        let (facts, _) = resolve(&records)?;
        assert_eq!(facts[0].act_date, NormalizedValue::Unspecified);
        assert_eq!(facts[0].page_number, NormalizedValue::Unspecified);
        assert_eq!(facts[0].cells()[5], "non specifies");
        Ok(())
    }

    #[test]
    fn test_department_variants_resolve_to_one_commune() -> Result<()> {
        let records = vec![
            row("1", "Mariage", ("A", "a"), ("B", "b"), " Nantes ", "44.0", "", ""),
            row("2", "Mariage", ("C", "c"), ("D", "d"), "Nantes", "44", "", ""),
        ];
        let (facts, _) = resolve(&records)?;
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].commune_id, facts[1].commune_id);
        Ok(())
    }

    #[test]
    fn test_unlisted_department_is_filtered() -> Result<()> {
        let records = vec![row(
            "1",
            "Mariage",
            ("DUPONT", "Jean"),
            ("DURAND", "Marie"),
            "Rennes",
            "35",
            "",
            "",
        )];
        let (facts, report) = resolve(&records)?;
        assert!(facts.is_empty());
        assert_eq!(report.rows_filtered, 1);
        Ok(())
    }

    #[test]
    fn test_missing_lookup_entry_counts_as_drop() -> Result<()> {
        let normalizer = Normalizer::default();
        let reference = ReferenceConfig::default();
        let records = vec![row(
            "1",
            "Mariage",
            ("DUPONT", "Jean"),
            ("DURAND", "Marie"),
            "Nantes",
            "44",
            "",
            "",
        )];
        let types = build_act_types(&records, &normalizer, &reference);
        let persons = resolve_persons(&records, &normalizer);
        let empty = HashMap::new();
        let resolver = FactResolver {
            normalizer: &normalizer,
            reference: &reference,
            act_types: &types.lookup,
            persons: &persons.lookup,
            communes: &empty,
        };
        let (facts, report) = resolver.resolve(&records)?;
        assert!(facts.is_empty());
        assert_eq!(report.dropped_commune, 1);
        Ok(())
    }
}
