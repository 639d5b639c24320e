// mariage-core/src/domain/dimension/act_type.rs

use std::collections::{BTreeSet, HashMap};

use crate::domain::dimension::Dimension;
use crate::domain::keys::SurrogateKey;
use crate::domain::normalize::{NormalizedValue, Normalizer};
use crate::domain::project::ReferenceConfig;
use crate::domain::record::RawRecord;
use crate::domain::table::{TYPE_ACTE, TableSpec, Tabular};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActType {
    pub id: SurrogateKey,
    pub label: String,
}

impl Tabular for ActType {
    const TABLE: TableSpec = TYPE_ACTE;

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.label.clone()]
    }
}

/// Distinct whitelisted labels found in the source, numbered 1..=N in
/// lexicographic order.
pub fn build_act_types(
    records: &[RawRecord],
    normalizer: &Normalizer,
    reference: &ReferenceConfig,
) -> Dimension<ActType, String> {
    let labels: BTreeSet<String> = records
        .iter()
        .filter_map(|r| match normalizer.normalize(r.act_type.as_deref()) {
            NormalizedValue::Text(label) if reference.is_valid_act_type(&label) => Some(label),
            _ => None,
        })
        .collect();

    let rows: Vec<ActType> = labels
        .into_iter()
        .zip(1..)
        .map(|(label, id)| ActType { id, label })
        .collect();

    let lookup: HashMap<String, SurrogateKey> =
        rows.iter().map(|t| (t.label.clone(), t.id)).collect();

    Dimension { rows, lookup }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(act_type: &str) -> RawRecord {
        RawRecord::from_fields(["1", act_type])
    }

    #[test]
    fn test_only_present_whitelisted_labels_sorted() {
        let records = vec![
            record("Publication de mariage"),
            record("Mariage"),
            record("Divorce pur et simple"),
            record(" Mariage "),
            record("Contrat de mariage"),
            record(""),
        ];
        let dim = build_act_types(&records, &Normalizer::default(), &ReferenceConfig::default());

        let labels: Vec<(u32, &str)> = dim.rows.iter().map(|t| (t.id, t.label.as_str())).collect();
        assert_eq!(
            labels,
            vec![
                (1, "Contrat de mariage"),
                (2, "Mariage"),
                (3, "Publication de mariage")
            ]
        );
        assert_eq!(dim.lookup.get("Mariage"), Some(&2));
        assert!(!dim.lookup.contains_key("Divorce"));
    }
}
