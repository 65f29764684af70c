//! Episodes: numbered stories with bilingual titles and a cover image

use crate::client::body::{MultipartForm, RequestBody, Upload};
use crate::client::endpoint::Endpoints;
use crate::core::field::{FieldDef, FieldKind};
use crate::core::form::FormPayload;
use crate::core::record::{Editable, Record};
use crate::core::validation::validate_not_blank;
use crate::entities::{lenient_bool, lenient_int, nullable_string, optional_bool};
use crate::sort_keys;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub story_number: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub story_title: String,
    /// Malayalam title
    #[serde(default, deserialize_with = "nullable_string")]
    pub ml_title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    /// Operator-assigned identifier, distinct from the backend `_id`
    #[serde(rename = "id", default, deserialize_with = "nullable_string")]
    pub external_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub cover_image: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_highlighted: bool,
    #[serde(default = "visible_by_default", deserialize_with = "visibility")]
    pub visibility_status: bool,
}

fn visible_by_default() -> bool {
    true
}

fn visibility<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(optional_bool(deserializer)?.unwrap_or_else(visible_by_default))
}

sort_keys! {
    pub enum EpisodeSort {
        StoryNumberAsc => ("storyNumber", Asc, "Story Number (Low to High)"),
        StoryNumberDesc => ("storyNumber", Desc, "Story Number (High to Low)"),
        StoryTitleAsc => ("storyTitle", Asc, "Story Title (A-Z)"),
        StoryTitleDesc => ("storyTitle", Desc, "Story Title (Z-A)"),
        HighlightedFirst => ("isHighlighted", Desc, "Highlighted First"),
        VisibleFirst => ("visibilityStatus", Desc, "Visible First"),
    }
}

const FIELDS: &[FieldDef<Episode>] = &[
    FieldDef::new("storyNumber", FieldKind::Integer, |e: &Episode| e.story_number.into()).searchable(),
    FieldDef::new("storyTitle", FieldKind::Text, |e: &Episode| e.story_title.as_str().into()).searchable(),
    FieldDef::new("mlTitle", FieldKind::Text, |e: &Episode| e.ml_title.as_str().into()).searchable(),
    FieldDef::new("name", FieldKind::Text, |e: &Episode| e.name.as_str().into()),
    FieldDef::new("isHighlighted", FieldKind::Boolean, |e: &Episode| e.is_highlighted.into()),
    FieldDef::new("visibilityStatus", FieldKind::Boolean, |e: &Episode| e.visibility_status.into()),
];

static ENDPOINTS: Endpoints = Endpoints::crud("/episode");

impl Record for Episode {
    type SortKey = EpisodeSort;

    fn entity_name() -> &'static str {
        "episode"
    }

    fn plural_name() -> &'static str {
        "episodes"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldDef<Self>] {
        FIELDS
    }

    fn default_sort() -> EpisodeSort {
        EpisodeSort::StoryNumberAsc
    }

    fn endpoints() -> &'static Endpoints {
        &ENDPOINTS
    }
}

/// Create/edit form for an episode, sent as multipart
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeForm {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub story_number: i64,
    #[validate(custom(function = "validate_not_blank"))]
    pub story_title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub ml_title: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(rename = "id")]
    #[validate(custom(function = "validate_not_blank"))]
    pub external_id: String,
    /// Existing cover reference, kept when no new image is attached
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_highlighted: bool,
    #[serde(default = "visible_by_default")]
    pub visibility_status: bool,
    #[serde(skip)]
    pub upload: Option<Upload>,
}

impl EpisodeForm {
    /// Prefill the form from an existing episode
    pub fn from_record(episode: &Episode) -> Self {
        Self {
            story_number: episode.story_number,
            story_title: episode.story_title.clone(),
            ml_title: episode.ml_title.clone(),
            name: episode.name.clone(),
            external_id: episode.external_id.clone(),
            cover_image: Some(episode.cover_image.clone()).filter(|c| !c.is_empty()),
            is_highlighted: episode.is_highlighted,
            visibility_status: episode.visibility_status,
            upload: None,
        }
    }
}

impl FormPayload for EpisodeForm {
    fn to_body(&self) -> RequestBody {
        let form = MultipartForm::new()
            .text("storyNumber", self.story_number)
            .text("storyTitle", &self.story_title)
            .text("mlTitle", &self.ml_title)
            .text("name", &self.name)
            .text("id", &self.external_id)
            .text("isHighlighted", self.is_highlighted)
            .text("visibilityStatus", self.visibility_status)
            .image("coverImage", self.cover_image.as_deref(), self.upload.as_ref());
        RequestBody::Multipart(form)
    }

    fn attach_image(&mut self, upload: Upload) -> bool {
        self.upload = Some(upload);
        true
    }
}

impl Editable for Episode {
    type Form = EpisodeForm;
}
