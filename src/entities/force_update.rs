//! Force-update flags: app versions that clients must upgrade to

use crate::client::body::RequestBody;
use crate::client::endpoint::Endpoints;
use crate::core::field::{FieldDef, FieldKind};
use crate::core::form::FormPayload;
use crate::core::record::{Editable, Record};
use crate::core::validation::{validate_not_blank, validate_version};
use crate::entities::{lenient_bool, nullable_string};
use crate::sort_keys;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceUpdate {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "nullable_string")]
    pub changes: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

sort_keys! {
    pub enum ForceUpdateSort {
        LatestFirst => ("updatedAt", Desc, "Latest First"),
        OldestFirst => ("updatedAt", Asc, "Oldest First"),
        VersionAsc => ("version", Asc, "Version (Low to High)"),
        VersionDesc => ("version", Desc, "Version (High to Low)"),
        EnabledFirst => ("enabled", Desc, "Enabled First"),
        DisabledFirst => ("enabled", Asc, "Disabled First"),
    }
}

const FIELDS: &[FieldDef<ForceUpdate>] = &[
    FieldDef::new("version", FieldKind::Version, |u: &ForceUpdate| u.version.as_str().into()).searchable(),
    FieldDef::new("enabled", FieldKind::Boolean, |u: &ForceUpdate| u.enabled.into()),
    FieldDef::new("changes", FieldKind::Text, |u: &ForceUpdate| u.changes.as_str().into()).searchable(),
    FieldDef::new("updatedAt", FieldKind::Timestamp, |u: &ForceUpdate| u.updated_at.into()),
];

static ENDPOINTS: Endpoints = Endpoints {
    list: "/forceUpdate",
    create: Some("/force-update"),
    update: Some("/force-update"),
    delete: None,
};

impl Record for ForceUpdate {
    type SortKey = ForceUpdateSort;

    fn entity_name() -> &'static str {
        "force update"
    }

    fn plural_name() -> &'static str {
        "updates"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldDef<Self>] {
        FIELDS
    }

    fn default_sort() -> ForceUpdateSort {
        ForceUpdateSort::LatestFirst
    }

    fn endpoints() -> &'static Endpoints {
        &ENDPOINTS
    }
}

/// Create/edit form for a force update, sent as JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ForceUpdateForm {
    #[validate(custom(function = "validate_version"))]
    pub version: String,
    #[serde(default)]
    pub enabled: bool,
    #[validate(custom(function = "validate_not_blank"))]
    pub changes: String,
}

impl ForceUpdateForm {
    pub fn from_record(update: &ForceUpdate) -> Self {
        Self {
            version: update.version.clone(),
            enabled: update.enabled,
            changes: update.changes.clone(),
        }
    }
}

impl FormPayload for ForceUpdateForm {
    fn to_body(&self) -> RequestBody {
        RequestBody::Json(json!({
            "version": self.version.trim(),
            "enabled": self.enabled,
            "changes": self.changes,
        }))
    }
}

impl Editable for ForceUpdate {
    type Form = ForceUpdateForm;
}
