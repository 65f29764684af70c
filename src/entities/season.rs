//! Seasons of the "Poocha Police" series

use crate::client::body::{MultipartForm, RequestBody, Upload};
use crate::client::endpoint::Endpoints;
use crate::core::field::{FieldDef, FieldKind};
use crate::core::form::FormPayload;
use crate::core::record::{Editable, Record};
use crate::core::validation::validate_not_blank;
use crate::entities::{lenient_int, nullable_string};
use crate::sort_keys;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub season_title: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub story_number: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub season_banner: String,
}

sort_keys! {
    pub enum SeasonSort {
        StoryNumberAsc => ("storyNumber", Asc, "Story Number (Low to High)"),
        StoryNumberDesc => ("storyNumber", Desc, "Story Number (High to Low)"),
        SeasonTitleAsc => ("seasonTitle", Asc, "Season Title (A-Z)"),
        SeasonTitleDesc => ("seasonTitle", Desc, "Season Title (Z-A)"),
    }
}

const FIELDS: &[FieldDef<Season>] = &[
    FieldDef::new("seasonTitle", FieldKind::Text, |s: &Season| s.season_title.as_str().into()).searchable(),
    FieldDef::new("storyNumber", FieldKind::Integer, |s: &Season| s.story_number.into()).searchable(),
];

static ENDPOINTS: Endpoints = Endpoints::crud("/poochaPolice");

impl Record for Season {
    type SortKey = SeasonSort;

    fn entity_name() -> &'static str {
        "season"
    }

    fn plural_name() -> &'static str {
        "seasons"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldDef<Self>] {
        FIELDS
    }

    fn default_sort() -> SeasonSort {
        SeasonSort::StoryNumberAsc
    }

    fn endpoints() -> &'static Endpoints {
        &ENDPOINTS
    }
}

/// Create/edit form for a season, sent as multipart
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SeasonForm {
    #[validate(custom(function = "validate_not_blank"))]
    pub season_title: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub story_number: i64,
    /// Existing banner reference, kept when no new image is attached
    #[serde(default)]
    pub season_banner: Option<String>,
    #[serde(skip)]
    pub upload: Option<Upload>,
}

impl SeasonForm {
    pub fn from_record(season: &Season) -> Self {
        Self {
            season_title: season.season_title.clone(),
            story_number: season.story_number,
            season_banner: Some(season.season_banner.clone()).filter(|b| !b.is_empty()),
            upload: None,
        }
    }
}

impl FormPayload for SeasonForm {
    fn to_body(&self) -> RequestBody {
        let form = MultipartForm::new()
            .text("seasonTitle", &self.season_title)
            .text("storyNumber", self.story_number)
            .image("seasonBanner", self.season_banner.as_deref(), self.upload.as_ref());
        RequestBody::Multipart(form)
    }

    fn attach_image(&mut self, upload: Upload) -> bool {
        self.upload = Some(upload);
        true
    }
}

impl Editable for Season {
    type Form = SeasonForm;
}
