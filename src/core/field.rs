//! Field value types, search text and per-kind ordering

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// A primitive field value read from a record
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

/// How a field is compared when a list is sorted by it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Locale-aware lexicographic order
    Text,
    /// Numeric-aware order for dotted version strings ("1.2.0" < "1.10.0")
    Version,
    Integer,
    /// `false` before `true`
    Boolean,
    Timestamp,
}

/// One entry of a record's field-accessor table
pub struct FieldDef<T> {
    /// Wire name of the field (e.g. "storyNumber")
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether the free-text search looks at this field
    pub searchable: bool,
    pub get: fn(&T) -> FieldValue,
}

impl<T> FieldDef<T> {
    pub const fn new(name: &'static str, kind: FieldKind, get: fn(&T) -> FieldValue) -> Self {
        Self {
            name,
            kind,
            searchable: false,
            get,
        }
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Lower-cased string form used by the free-text search.
    ///
    /// Integers use their decimal representation, so a search for "1"
    /// matches 1, 12 and 21.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.to_lowercase()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Timestamp(t) => Some(t.to_rfc3339().to_lowercase()),
            FieldValue::Null => None,
        }
    }

    /// Display form for tables
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Timestamp(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Ascending comparison of two values of a field of the given kind.
    ///
    /// Null (or a value of an unexpected variant) orders before any present value.
    pub fn compare(&self, other: &FieldValue, kind: FieldKind) -> Ordering {
        match kind {
            FieldKind::Text => cmp_present(self.as_text(), other.as_text(), locale_compare),
            FieldKind::Version => cmp_present(self.as_text(), other.as_text(), natural_compare),
            FieldKind::Integer => cmp_present(self.as_integer(), other.as_integer(), |a, b| a.cmp(&b)),
            FieldKind::Boolean => cmp_present(self.as_bool(), other.as_bool(), |a, b| a.cmp(&b)),
            FieldKind::Timestamp => cmp_present(self.as_timestamp(), other.as_timestamp(), |a, b| a.cmp(&b)),
        }
    }

    fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

fn cmp_present<V>(a: Option<V>, b: Option<V>, cmp: impl Fn(V, V) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Locale-aware string ordering.
///
/// Compared level by level, each level only breaking ties of the previous one:
/// 1. base letters, ignoring case and diacritics ("éclair" < "zebra")
/// 2. diacritics, unaccented first ("eclair" < "éclair")
/// 3. case, lowercase first ("apple" < "Apple")
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| a.nfd().flat_map(char::to_lowercase).cmp(b.nfd().flat_map(char::to_lowercase)))
        .then_with(|| a.nfd().map(char::is_uppercase).cmp(b.nfd().map(char::is_uppercase)))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_diacritic(*c))
        .flat_map(char::to_lowercase)
}

/// Combining diacritical marks (accents, cedillas, umlauts, ...).
///
/// Vowel signs of Indic scripts are also combining marks but carry primary
/// weight, so only the diacritic blocks are folded.
fn is_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Numeric-aware string ordering: runs of ASCII digits compare by value,
/// everything else compares with [`locale_compare`].
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x, y) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => locale_compare(x, y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits {
            Chunk::Digits(head)
        } else {
            Chunk::Text(head)
        })
    }
}
