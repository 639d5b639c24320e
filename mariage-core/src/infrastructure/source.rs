// mariage-core/src/infrastructure/source.rs
//
// Reads the headerless raw act file into typed records.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use csv::{ReaderBuilder, Terminator};
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::record::{RawRecord, SOURCE_COLUMNS};
use crate::error::MariageError;
use crate::infrastructure::error::InfrastructureError;

const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// Parser for the raw source format: comma-delimited, no header, `\n` line
/// terminator, backslash escapes (inside and outside quotes), minimal quoting.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    delimiter: char,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self))]
    pub fn load_file(&self, path: &Path) -> Result<Vec<RawRecord>, MariageError> {
        let file = File::open(path).map_err(|e| {
            InfrastructureError::Io(std::io::Error::new(
                e.kind(),
                format!("Cannot open source file {:?}: {}", path, e),
            ))
        })?;
        let records = self.load_reader(file)?;
        info!(rows = records.len(), "Source file loaded");
        Ok(records)
    }

    /// Parses every row. Short rows are padded with absent values; rows with more
    /// than the fixed column count abort the load.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<Vec<RawRecord>, MariageError> {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .map_err(InfrastructureError::Io)?;
        let text = quote_escaped_fields(&raw, self.delimiter);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter as u8)
            .terminator(Terminator::Any(b'\n'))
            .escape(Some(ESCAPE as u8))
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(InfrastructureError::Csv)?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            if row.len() > SOURCE_COLUMNS {
                return Err(DomainError::ColumnCount {
                    line,
                    found: row.len(),
                    expected: SOURCE_COLUMNS,
                }
                .into());
            }
            if row.len() < SOURCE_COLUMNS {
                warn!(
                    line,
                    found = row.len(),
                    "Short source row, missing fields treated as absent"
                );
            }

            records.push(RawRecord::from_fields(row.iter()));
        }

        Ok(records)
    }
}

/// The csv reader only honours escapes inside quoted fields. Unquoted fields
/// holding `\x` sequences are rewritten as quoted fields carrying the unescaped
/// value, so `DUPONT\, dit Grand` stays one field. Line breaks are preserved.
fn quote_escaped_fields(input: &str, delimiter: char) -> Cow<'_, str> {
    if !input.contains(ESCAPE) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();
    while chars.peek().is_some() {
        if chars.peek() == Some(&QUOTE) {
            copy_quoted_field(&mut chars, &mut out, delimiter);
        } else {
            requote_unquoted_field(&mut chars, &mut out, delimiter);
        }
        // Field separator or line terminator
        if let Some(sep) = chars.next() {
            out.push(sep);
        }
    }
    Cow::Owned(out)
}

fn is_field_end(c: char, delimiter: char) -> bool {
    c == delimiter || c == '\n'
}

/// Copies a quoted field verbatim up to the next separator; the reader handles it.
fn copy_quoted_field(chars: &mut Peekable<Chars<'_>>, out: &mut String, delimiter: char) {
    if let Some(open) = chars.next() {
        out.push(open);
    }
    while let Some(c) = chars.next() {
        out.push(c);
        if c == ESCAPE {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == QUOTE {
            if chars.peek() == Some(&QUOTE) {
                out.push(QUOTE);
                chars.next();
            } else {
                break;
            }
        }
    }
    while let Some(&c) = chars.peek() {
        if is_field_end(c, delimiter) {
            break;
        }
        out.push(c);
        chars.next();
    }
}

fn requote_unquoted_field(chars: &mut Peekable<Chars<'_>>, out: &mut String, delimiter: char) {
    let mut value = String::new();
    let mut escaped = false;
    while let Some(&c) = chars.peek() {
        if is_field_end(c, delimiter) {
            break;
        }
        chars.next();
        if c == ESCAPE {
            escaped = true;
            // A trailing escape at end of input stays literal
            value.push(chars.next().unwrap_or(ESCAPE));
        } else {
            value.push(c);
        }
    }

    if !escaped {
        out.push_str(&value);
        return;
    }
    out.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}
