//! Stand-alone stories with bilingual titles and a read counter

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
pub struct SingleStory {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub story_title_en: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub story_title_ml: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub read_times: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub cover_image: String,
}

sort_keys! {
    pub enum SingleStorySort {
        MostRead => ("readTimes", Desc, "Most Read"),
        LeastRead => ("readTimes", Asc, "Least Read"),
        TitleEnAsc => ("storyTitleEn", Asc, "English Title (A-Z)"),
        TitleEnDesc => ("storyTitleEn", Desc, "English Title (Z-A)"),
        TitleMlAsc => ("storyTitleMl", Asc, "Malayalam Title (A-Z)"),
        TitleMlDesc => ("storyTitleMl", Desc, "Malayalam Title (Z-A)"),
    }
}

const FIELDS: &[FieldDef<SingleStory>] = &[
    FieldDef::new("storyTitleEn", FieldKind::Text, |s: &SingleStory| s.story_title_en.as_str().into()).searchable(),
    FieldDef::new("storyTitleMl", FieldKind::Text, |s: &SingleStory| s.story_title_ml.as_str().into()).searchable(),
    FieldDef::new("readTimes", FieldKind::Integer, |s: &SingleStory| s.read_times.into()).searchable(),
];

static ENDPOINTS: Endpoints = Endpoints::crud("/singleStory");

impl Record for SingleStory {
    type SortKey = SingleStorySort;

    fn entity_name() -> &'static str {
        "single story"
    }

    fn plural_name() -> &'static str {
        "single stories"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldDef<Self>] {
        FIELDS
    }

    fn default_sort() -> SingleStorySort {
        SingleStorySort::MostRead
    }

    fn endpoints() -> &'static Endpoints {
        &ENDPOINTS
    }
}

/// Create/edit form for a single story, sent as multipart
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SingleStoryForm {
    #[validate(custom(function = "validate_not_blank"))]
    pub story_title_en: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub story_title_ml: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub read_times: i64,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(skip)]
    pub upload: Option<Upload>,
}

impl SingleStoryForm {
    pub fn from_record(story: &SingleStory) -> Self {
        Self {
            story_title_en: story.story_title_en.clone(),
            story_title_ml: story.story_title_ml.clone(),
            read_times: story.read_times,
            cover_image: Some(story.cover_image.clone()).filter(|c| !c.is_empty()),
            upload: None,
        }
    }
}

impl FormPayload for SingleStoryForm {
    fn to_body(&self) -> RequestBody {
        let form = MultipartForm::new()
            .text("storyTitleEn", &self.story_title_en)
            .text("storyTitleMl", &self.story_title_ml)
            .text("readTimes", self.read_times)
            .image("coverImage", self.cover_image.as_deref(), self.upload.as_ref());
        RequestBody::Multipart(form)
    }

    fn attach_image(&mut self, upload: Upload) -> bool {
        self.upload = Some(upload);
        true
    }
}

impl Editable for SingleStory {
    type Form = SingleStoryForm;
}
