// mariage-core/src/domain/record.rs

/// Number of positional columns in the headerless source file.
pub const SOURCE_COLUMNS: usize = 16;

/// The two person slots of an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    A,
    B,
}

impl Role {
    /// Processing order. Role A always comes first so ids are stable across runs.
    pub const ALL: [Role; 2] = [Role::A, Role::B];
}

/// The five free-text fields describing one person slot, as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPerson {
    pub surname: Option<String>,
    pub given_name: Option<String>,
    pub father_given_name: Option<String>,
    pub mother_surname: Option<String>,
    pub mother_given_name: Option<String>,
}

/// One source row. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub act_type: Option<String>,
    pub person_a: RawPerson,
    pub person_b: RawPerson,
    pub commune: Option<String>,
    pub department: Option<String>,
    pub act_date: Option<String>,
    pub page_number: Option<String>,
}

impl RawRecord {
    /// Builds a record from positional fields:
    /// id, type, 5 x person a, 5 x person b, commune, department, date, page.
    ///
    /// Missing trailing fields are treated as absent.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut it = fields.into_iter().map(|f| {
            let f = f.as_ref();
            if f.is_empty() {
                None
            } else {
                Some(f.to_string())
            }
        });
        let mut next = || it.next().flatten();

        let id = next();
        let act_type = next();
        let person_a = RawPerson {
            surname: next(),
            given_name: next(),
            father_given_name: next(),
            mother_surname: next(),
            mother_given_name: next(),
        };
        let person_b = RawPerson {
            surname: next(),
            given_name: next(),
            father_given_name: next(),
            mother_surname: next(),
            mother_given_name: next(),
        };

        Self {
            id,
            act_type,
            person_a,
            person_b,
            commune: next(),
            department: next(),
            act_date: next(),
            page_number: next(),
        }
    }

    pub fn person(&self, role: Role) -> &RawPerson {
        match role {
            Role::A => &self.person_a,
            Role::B => &self.person_b,
        }
    }
}
