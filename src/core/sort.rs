//! Sort keys and directions
//!
//! Each entity declares a closed enum of sort keys. A key names exactly one
//! field and one direction and has a stable wire form `"<field>-<direction>"`
//! (e.g. `storyNumber-asc`), which is what front ends put in their dropdowns.

use crate::core::error::{AdminError, Result};
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(()),
        }
    }
}

/// A closed set of sort keys for one entity type
///
/// Implemented by the per-entity enums in [`crate::entities`], usually through
/// the `sort_keys!` macro.
pub trait SortKey: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every key, in dropdown order
    fn all() -> &'static [Self];

    /// Wire name of the field this key sorts by
    fn field(self) -> &'static str;

    fn direction(self) -> Direction;

    /// Human-readable label (e.g. "Story Number (Low to High)")
    fn label(self) -> &'static str;

    /// Wire form, `"<field>-<direction>"`
    fn key(self) -> String {
        format!("{}-{}", self.field(), self.direction())
    }

    /// The key for the same field in the other direction, if declared
    fn flipped(self) -> Option<Self> {
        let field = self.field();
        let direction = self.direction().flip();
        Self::all()
            .iter()
            .copied()
            .find(|k| k.field() == field && k.direction() == direction)
    }
}

/// Parse a `"<field>-<direction>"` string into one of `K`'s keys.
///
/// The string is split at its last `-`, so field names may contain dashes.
pub fn parse_sort_key<K: SortKey>(entity: &'static str, raw: &str) -> Result<K> {
    let invalid = || AdminError::InvalidSortKey {
        entity,
        key: raw.to_string(),
    };
    let (field, direction) = raw.rsplit_once('-').ok_or_else(invalid)?;
    let direction: Direction = direction.parse().map_err(|_| invalid())?;
    K::all()
        .iter()
        .copied()
        .find(|k| k.field() == field && k.direction() == direction)
        .ok_or_else(invalid)
}
