//! App users (read-only)

use crate::client::endpoint::Endpoints;
use crate::core::field::{FieldDef, FieldKind};
use crate::core::record::Record;
use crate::entities::{lenient_int, nullable_string};
use crate::sort_keys;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub age: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub guardian_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

sort_keys! {
    pub enum UserSort {
        NameAsc => ("name", Asc, "Name (A-Z)"),
        NameDesc => ("name", Desc, "Name (Z-A)"),
        AgeAsc => ("age", Asc, "Age (Low to High)"),
        AgeDesc => ("age", Desc, "Age (High to Low)"),
        GuardianNameAsc => ("guardianName", Asc, "Guardian Name (A-Z)"),
        GuardianNameDesc => ("guardianName", Desc, "Guardian Name (Z-A)"),
    }
}

const FIELDS: &[FieldDef<User>] = &[
    FieldDef::new("name", FieldKind::Text, |u: &User| u.name.as_str().into()).searchable(),
    FieldDef::new("age", FieldKind::Integer, |u: &User| u.age.into()).searchable(),
    FieldDef::new("gender", FieldKind::Text, |u: &User| u.gender.as_str().into()).searchable(),
    FieldDef::new("guardianName", FieldKind::Text, |u: &User| u.guardian_name.as_str().into()).searchable(),
];

static ENDPOINTS: Endpoints = Endpoints::read_only("/auth/users");

impl Record for User {
    type SortKey = UserSort;

    fn entity_name() -> &'static str {
        "user"
    }

    fn plural_name() -> &'static str {
        "users"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldDef<Self>] {
        FIELDS
    }

    fn default_sort() -> UserSort {
        UserSort::NameAsc
    }

    fn endpoints() -> &'static Endpoints {
        &ENDPOINTS
    }
}
