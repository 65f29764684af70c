//! Record traits defining the core abstraction for all managed entity types

use crate::client::endpoint::Endpoints;
use crate::core::field::{FieldDef, FieldValue};
use crate::core::form::FormPayload;
use crate::core::sort::SortKey;
use serde::de::DeserializeOwned;

/// Base trait for every record listed by the dashboard.
///
/// A record has a backend-assigned identifier (opaque, unique, immutable)
/// and a table of named primitive fields. The field table drives both the
/// free-text search and the sort comparators, so an entity is fully
/// described by:
/// - `fields()`: the field-accessor table
/// - `SortKey`: the closed set of sort keys offered for it
/// - `endpoints()`: where the backend serves it
pub trait Record: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Closed set of sort keys for this entity
    type SortKey: SortKey;

    /// Singular name used in messages (e.g. "episode")
    fn entity_name() -> &'static str;

    /// Plural name used in messages (e.g. "episodes")
    fn plural_name() -> &'static str;

    /// Backend-assigned identifier
    fn id(&self) -> &str;

    /// Field-accessor table
    fn fields() -> &'static [FieldDef<Self>];

    /// Sort key selected when a page is first shown
    fn default_sort() -> Self::SortKey;

    /// Backend endpoints serving this entity
    fn endpoints() -> &'static Endpoints;

    /// Look up a field definition by wire name
    fn field(name: &str) -> Option<&'static FieldDef<Self>> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Get the value of a specific field by name
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        Self::field(name).map(|f| (f.get)(self))
    }

    /// Whether any searchable field contains `needle` (already lower-cased)
    fn matches(&self, needle: &str) -> bool {
        Self::fields()
            .iter()
            .filter(|f| f.searchable)
            .filter_map(|f| (f.get)(self).search_text())
            .any(|text| text.contains(needle))
    }
}

/// Records that can be created and updated through a form
pub trait Editable: Record {
    type Form: FormPayload + DeserializeOwned;
}
