// mariage-core/src/domain/normalize.rs

use std::collections::HashSet;
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::project::ReferenceConfig;

/// Literal written in place of a missing value. Also the NULL token of the bulk load.
pub const PLACEHOLDER: &str = "non specifies";

/// A cell value after cleaning: either canonical text or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NormalizedValue {
    Text(String),
    Unspecified,
}

impl NormalizedValue {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Unspecified => PLACEHOLDER,
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns raw cell values into their canonical form.
///
/// Blank, whitespace-only and blacklisted tokens (compared case-insensitively after
/// trimming) collapse to [`NormalizedValue::Unspecified`]. Anything else is trimmed,
/// has its internal whitespace collapsed to single spaces, and has `"` replaced by `'`
/// and `;` replaced by `,`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    invalid_values: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ReferenceConfig::default().invalid_values)
    }
}

impl Normalizer {
    pub fn new<I, S>(invalid_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut invalid_values: HashSet<String> = invalid_values
            .into_iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .collect();
        // Our own output must normalize to itself.
        invalid_values.insert(PLACEHOLDER.to_string());
        Self { invalid_values }
    }

    pub fn normalize(&self, value: Option<&str>) -> NormalizedValue {
        let Some(raw) = value else {
            return NormalizedValue::Unspecified;
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() || self.is_placeholder(trimmed) {
            return NormalizedValue::Unspecified;
        }

        let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
        let cleaned = collapsed.replace('"', "'").replace(';', ",");
        let cleaned = cleaned.trim();

        // Substitutions may produce a blacklisted token; a second pass must not change it.
        if cleaned.is_empty() || self.is_placeholder(cleaned) {
            return NormalizedValue::Unspecified;
        }

        NormalizedValue::Text(cleaned.to_string())
    }

    pub fn normalize_str(&self, value: &str) -> NormalizedValue {
        self.normalize(Some(value))
    }

    /// Department code of a raw cell. Blacklisted tokens count as absent.
    pub fn department_code(&self, value: Option<&str>) -> Result<Option<u32>, DomainError> {
        match self.normalize(value) {
            NormalizedValue::Text(code) => normalize_department_code(Some(&code)),
            NormalizedValue::Unspecified => Ok(None),
        }
    }

    fn is_placeholder(&self, value: &str) -> bool {
        self.invalid_values.contains(&value.to_lowercase())
    }
}

/// Parses a department code that may be float-formatted ("44.0") into an integer.
///
/// Absent or blank input yields `Ok(None)`. Anything that is not a finite,
/// non-negative number fitting in a `u32` is a [`DomainError::MalformedDepartmentCode`].
pub fn normalize_department_code(value: Option<&str>) -> Result<Option<u32>, DomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let malformed = || DomainError::MalformedDepartmentCode(raw.to_string());

    if let Ok(code) = trimmed.parse::<u32>() {
        return Ok(Some(code));
    }

    let parsed: f64 = trimmed.parse().map_err(|_| malformed())?;
    let truncated = parsed.trunc();
    if !truncated.is_finite() || truncated < 0.0 || truncated > f64::from(u32::MAX) {
        return Err(malformed());
    }

    Ok(Some(truncated as u32))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn text(s: &str) -> NormalizedValue {
        NormalizedValue::Text(s.to_string())
    }

    #[test]
    fn test_placeholder_tokens_collapse() {
        let n = Normalizer::default();
        for raw in ["n/a", "NA", "", "...", "   ", "NaN", "None", "non specifies"] {
            assert_eq!(n.normalize_str(raw), NormalizedValue::Unspecified, "{raw:?}");
        }
        assert_eq!(n.normalize(None), NormalizedValue::Unspecified);
    }

    #[test]
    fn test_whitespace_and_substitutions() {
        let n = Normalizer::default();
        assert_eq!(n.normalize_str("  Jean \n  Pierre\r\n"), text("Jean Pierre"));
        assert_eq!(n.normalize_str("dit \"le grand\""), text("dit 'le grand'"));
        assert_eq!(n.normalize_str("Nantes;Loire"), text("Nantes,Loire"));
        assert_eq!(n.normalize_str("\tMarie\t"), text("Marie"));
    }

    #[test]
    fn test_case_is_preserved() {
        let n = Normalizer::default();
        assert_eq!(n.normalize_str("DUPONT"), text("DUPONT"));
        assert_ne!(n.normalize_str("DUPONT"), n.normalize_str("Dupont"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = Normalizer::default();
        let inputs = [
            "  a  b ",
            "x;\"y\"",
            "n/a",
            "...",
            "Promesse de mariage - fiançailles",
            " ; ",
            "\" \"",
            "line\nbreak",
        ];
        for raw in inputs {
            let once = n.normalize_str(raw);
            let twice = n.normalize_str(once.as_str());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_custom_blacklist() {
        let n = Normalizer::new(["inconnu", " ? "]);
        assert_eq!(n.normalize_str("Inconnu"), NormalizedValue::Unspecified);
        assert_eq!(n.normalize_str("?"), NormalizedValue::Unspecified);
        assert_eq!(n.normalize_str("n/a"), text("n/a"));
    }

    #[test]
    fn test_department_code_parsing() -> Result<()> {
        assert_eq!(normalize_department_code(Some("44"))?, Some(44));
        assert_eq!(normalize_department_code(Some("44.0"))?, Some(44));
        assert_eq!(normalize_department_code(Some(" 85 "))?, Some(85));
        assert_eq!(normalize_department_code(Some("49.7"))?, Some(49));
        assert_eq!(normalize_department_code(None)?, None);
        assert_eq!(normalize_department_code(Some(""))?, None);
        Ok(())
    }

    #[test]
    fn test_blacklisted_department_code_is_absent() -> Result<()> {
        let n = Normalizer::default();
        assert_eq!(n.department_code(Some("n/a"))?, None);
        assert_eq!(n.department_code(Some(" NaN "))?, None);
        assert_eq!(n.department_code(Some("44.0"))?, Some(44));
        assert!(n.department_code(Some("Vendée")).is_err());
        Ok(())
    }

    #[test]
    fn test_department_code_malformed_is_error() {
        for raw in ["Loire", "4x", "-3", "inf", "NaN"] {
            let err = normalize_department_code(Some(raw)).unwrap_err();
            assert!(matches!(err, DomainError::MalformedDepartmentCode(_)), "{raw:?}");
        }
    }
}
