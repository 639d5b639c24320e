// mariage-core/src/domain/table.rs
//
// Table catalogue and the delimited-text conventions shared by the writer and
// the bulk loader. Changing one side without the other breaks the load.

use crate::domain::normalize::PLACEHOLDER;

/// Delimited-text conventions for every produced table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormat {
    pub delimiter: u8,
    pub quote: u8,
    pub escape: u8,
    pub header: bool,
    pub null_token: &'static str,
}

pub const TABLE_FORMAT: TextFormat = TextFormat {
    delimiter: b';',
    quote: b'"',
    escape: b'\\',
    header: true,
    null_token: PLACEHOLDER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

pub const TYPE_ACTE: TableSpec = TableSpec {
    name: "type_acte",
    columns: &["id", "libelle"],
};

pub const DEPARTEMENT: TableSpec = TableSpec {
    name: "departement",
    columns: &["code", "nom"],
};

pub const COMMUNE: TableSpec = TableSpec {
    name: "commune",
    columns: &["id", "nom", "dept_code"],
};

pub const PERSONNE: TableSpec = TableSpec {
    name: "personne",
    columns: &["id", "nom", "prenom", "prenom_pere", "nom_mere", "prenom_mere"],
};

pub const ACTE_MARIAGE: TableSpec = TableSpec {
    name: "acte_mariage",
    columns: &[
        "id",
        "type_id",
        "personne_a_id",
        "personne_b_id",
        "commune_id",
        "date_acte",
        "num_vue",
    ],
};

/// Dimensions first, fact last: the order foreign keys require.
pub const LOAD_ORDER: [TableSpec; 5] = [TYPE_ACTE, DEPARTEMENT, COMMUNE, PERSONNE, ACTE_MARIAGE];

/// An entity that serializes to one row of a table.
pub trait Tabular {
    const TABLE: TableSpec;

    /// Cell values in the column order of [`Tabular::TABLE`].
    fn cells(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_order_is_dimensions_then_fact() {
        let names: Vec<&str> = LOAD_ORDER.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            ["type_acte", "departement", "commune", "personne", "acte_mariage"]
        );
        assert_eq!(ACTE_MARIAGE.file_name(), "acte_mariage.csv");
    }
}
