//! List-filter-sort view model
//!
//! Every management page holds a canonical collection fetched from the
//! backend plus two pieces of UI state, a free-text search term and a sort
//! key. The rendered list is derived from those three inputs by [`apply`]
//! and recomputed on every state change; it is never edited directly.

use crate::core::error::{AdminError, Result};
use crate::core::record::Record;
use crate::core::sort::{Direction, SortKey, parse_sort_key};
use indexmap::IndexSet;

/// Filter and order `collection` for display.
///
/// A record is kept iff the lower-cased string form of one of its searchable
/// fields contains the lower-cased `search_term`; an empty term keeps every
/// record. The kept records are then stably sorted by the key's field with
/// that field's comparator, reversed for [`Direction::Desc`]. Ties keep their
/// original relative order.
pub fn apply<T: Record>(collection: &[T], search_term: &str, sort_key: T::SortKey) -> Vec<T> {
    let needle = search_term.to_lowercase();
    let mut result: Vec<T> = collection
        .iter()
        .filter(|record| needle.is_empty() || record.matches(&needle))
        .cloned()
        .collect();

    // Unknown fields are rejected by `ListViewModel::new`; a bare `apply` with
    // an inconsistent table simply keeps the filtered order.
    if let Some(def) = T::field(sort_key.field()) {
        let direction = sort_key.direction();
        result.sort_by(|a, b| {
            let ord = (def.get)(a).compare(&(def.get)(b), def.kind);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        });
    }

    result
}

/// Check that every sort key of `T` names a field of `T`'s field table
pub fn check_sort_keys<T: Record>() -> Result<()> {
    for key in T::SortKey::all() {
        if T::field(key.field()).is_none() {
            return Err(AdminError::Config(format!(
                "sort key '{}' of {} names unknown field '{}'",
                key.key(),
                T::entity_name(),
                key.field()
            )));
        }
    }
    Ok(())
}

/// Stateful view model for one page
#[derive(Debug, Clone)]
pub struct ListViewModel<T: Record> {
    canonical: Vec<T>,
    search_term: String,
    sort_key: T::SortKey,
    derived: Vec<T>,
}

impl<T: Record> ListViewModel<T> {
    /// Create an empty view model sorted by the entity's default key.
    ///
    /// Fails if the entity's sort-key table is inconsistent with its field table.
    pub fn new() -> Result<Self> {
        check_sort_keys::<T>()?;
        Ok(Self {
            canonical: Vec::new(),
            search_term: String::new(),
            sort_key: T::default_sort(),
            derived: Vec::new(),
        })
    }

    /// Replace the canonical collection wholesale.
    ///
    /// A collection with duplicate identifiers is rejected and the previous
    /// collection is kept.
    pub fn replace(&mut self, collection: Vec<T>) -> Result<()> {
        let mut seen = IndexSet::with_capacity(collection.len());
        for record in &collection {
            if !seen.insert(record.id()) {
                return Err(AdminError::DuplicateId {
                    entity: T::entity_name(),
                    id: record.id().to_string(),
                });
            }
        }
        self.canonical = collection;
        self.recompute();
        Ok(())
    }

    /// Drop the canonical collection (the page was left)
    pub fn clear(&mut self) {
        self.canonical.clear();
        self.recompute();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute();
    }

    pub fn set_sort(&mut self, key: T::SortKey) {
        self.sort_key = key;
        self.recompute();
    }

    /// Select a sort key by its wire form (`"<field>-<direction>"`)
    pub fn set_sort_str(&mut self, raw: &str) -> Result<()> {
        let key = parse_sort_key::<T::SortKey>(T::entity_name(), raw)?;
        self.set_sort(key);
        Ok(())
    }

    /// The derived (filtered and sorted) list
    pub fn view(&self) -> &[T] {
        &self.derived
    }

    /// The full collection last retrieved from the backend
    pub fn canonical(&self) -> &[T] {
        &self.canonical
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> T::SortKey {
        self.sort_key
    }

    /// Find a record of the canonical collection by identifier
    pub fn find(&self, id: &str) -> Option<&T> {
        self.canonical.iter().find(|r| r.id() == id)
    }

    fn recompute(&mut self) {
        self.derived = apply(&self.canonical, &self.search_term, self.sort_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::endpoint::Endpoints;
    use crate::core::field::{FieldDef, FieldKind};
    use crate::sort_keys;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Person {
        id: String,
        name: String,
        age: i64,
    }

    fn person(id: &str, name: &str, age: i64) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            age,
        }
    }

    sort_keys! {
        enum PersonSort {
            NameAsc => ("name", Asc, "Name (A-Z)"),
            NameDesc => ("name", Desc, "Name (Z-A)"),
            AgeAsc => ("age", Asc, "Age (Low to High)"),
            AgeDesc => ("age", Desc, "Age (High to Low)"),
        }
    }

    const PERSON_FIELDS: &[FieldDef<Person>] = &[
        FieldDef::new("name", FieldKind::Text, |p: &Person| p.name.as_str().into()).searchable(),
        FieldDef::new("age", FieldKind::Integer, |p: &Person| p.age.into()).searchable(),
    ];

    static PERSON_ENDPOINTS: Endpoints = Endpoints::read_only("/people");

    impl Record for Person {
        type SortKey = PersonSort;

        fn entity_name() -> &'static str {
            "person"
        }

        fn plural_name() -> &'static str {
            "people"
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn fields() -> &'static [FieldDef<Self>] {
            PERSON_FIELDS
        }

        fn default_sort() -> PersonSort {
            PersonSort::NameAsc
        }

        fn endpoints() -> &'static Endpoints {
            &PERSON_ENDPOINTS
        }
    }

    fn names(list: &[Person]) -> Vec<&str> {
        list.iter().map(|p| p.name.as_str()).collect()
    }

    fn sample() -> Vec<Person> {
        vec![
            person("1", "Bob", 12),
            person("2", "Ann", 30),
            person("3", "Cid", 12),
        ]
    }

    #[test]
    fn test_tie_keeps_original_order() {
        let result = apply(&sample(), "", PersonSort::AgeAsc);
        assert_eq!(names(&result), vec!["Bob", "Cid", "Ann"]);
    }

    #[test]
    fn test_name_desc() {
        let result = apply(&sample(), "", PersonSort::NameDesc);
        assert_eq!(names(&result), vec!["Cid", "Bob", "Ann"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let result = apply(&sample(), "aN", PersonSort::NameAsc);
        assert_eq!(names(&result), vec!["Ann"]);
    }

    #[test]
    fn test_search_matches_integer_substring() {
        let result = apply(&sample(), "3", PersonSort::NameAsc);
        assert_eq!(names(&result), vec!["Ann"]);

        let result = apply(&sample(), "1", PersonSort::NameAsc);
        assert_eq!(names(&result), vec!["Bob", "Cid"]);
    }

    #[test]
    fn test_empty_search_returns_everything_sorted() {
        let result = apply(&sample(), "", PersonSort::NameAsc);
        assert_eq!(names(&result), vec!["Ann", "Bob", "Cid"]);
    }

    #[test]
    fn test_result_is_subset_of_input() {
        let input = sample();
        for term in ["", "b", "1", "zzz", "A"] {
            for key in PersonSort::all() {
                let result = apply(&input, term, *key);
                assert!(result.iter().all(|r| input.contains(r)));
                assert!(result.len() <= input.len());
            }
        }
    }

    #[test]
    fn test_apply_is_deterministic_and_idempotent() {
        let input = sample();
        for key in PersonSort::all() {
            let first = apply(&input, "", *key);
            let second = apply(&input, "", *key);
            assert_eq!(first, second);
            let again = apply(&first, "", *key);
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_direction_flip_reverses_strict_order() {
        let input = sample();
        let asc = apply(&input, "", PersonSort::NameAsc);
        let mut desc = apply(&input, "", PersonSort::NameDesc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_view_model_recomputes_on_every_change() {
        let mut vm = ListViewModel::<Person>::new().expect("consistent table");
        assert!(vm.view().is_empty());

        vm.replace(sample()).expect("unique ids");
        assert_eq!(names(vm.view()), vec!["Ann", "Bob", "Cid"]);

        vm.set_search("c");
        assert_eq!(names(vm.view()), vec!["Cid"]);

        vm.set_search("");
        vm.set_sort_str("age-desc").expect("known key");
        assert_eq!(vm.sort_key(), PersonSort::AgeDesc);
        assert_eq!(names(vm.view()), vec!["Ann", "Bob", "Cid"]);

        vm.clear();
        assert!(vm.view().is_empty());
        assert_eq!(vm.search_term(), "");
    }

    #[test]
    fn test_view_model_rejects_duplicate_ids() {
        let mut vm = ListViewModel::<Person>::new().expect("consistent table");
        vm.replace(sample()).expect("unique ids");

        let err = vm
            .replace(vec![person("9", "Eve", 1), person("9", "Eve", 1)])
            .unwrap_err();
        assert!(matches!(err, AdminError::DuplicateId { .. }));
        assert_eq!(vm.canonical().len(), 3);
    }

    #[test]
    fn test_view_model_rejects_unknown_sort_string() {
        let mut vm = ListViewModel::<Person>::new().expect("consistent table");
        let err = vm.set_sort_str("height-asc").unwrap_err();
        assert!(matches!(err, AdminError::InvalidSortKey { .. }));
        assert_eq!(vm.sort_key(), PersonSort::NameAsc);
    }

    #[test]
    fn test_find_by_id() {
        let mut vm = ListViewModel::<Person>::new().expect("consistent table");
        vm.replace(sample()).expect("unique ids");
        assert_eq!(vm.find("2").map(|p| p.name.as_str()), Some("Ann"));
        assert!(vm.find("42").is_none());
    }
}
