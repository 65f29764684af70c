//! The records managed by the dashboard
//!
//! Each entity declares its field-accessor table, its closed sort-key enum
//! (through [`sort_keys!`](crate::sort_keys)) and, when it can be edited,
//! the form payload sent to the backend.

pub mod episode;
pub mod force_update;
pub mod macros;
pub mod season;
pub mod single_story;
pub mod user;

pub use episode::{Episode, EpisodeForm, EpisodeSort};
pub use force_update::{ForceUpdate, ForceUpdateForm, ForceUpdateSort};
pub use season::{Season, SeasonForm, SeasonSort};
pub use single_story::{SingleStory, SingleStoryForm, SingleStorySort};
pub use user::{User, UserSort};

use serde::{Deserialize, Deserializer, de};

/// A text field the backend may send as `null`; read as empty
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accept an integer sent either as a JSON number or as a numeric string.
///
/// Form-encoded writes leave numbers as strings on some backend records.
/// `null` reads as zero; pair with `#[serde(default)]` for absent fields.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Int(n)) => Ok(n),
        Some(Raw::Float(f)) if f.fract() == 0.0 => Ok(f as i64),
        Some(Raw::Float(f)) => Err(de::Error::custom(format!("expected an integer, got {}", f))),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected an integer, got '{}'", s))),
    }
}

/// Accept a boolean sent either as a JSON boolean or as `"true"`/`"false"`.
/// `null` reads as `false`.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_bool(deserializer)?.unwrap_or(false))
}

/// Like [`lenient_bool`], but `null` stays `None` for the caller to default
pub(crate) fn optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Text(s)) => match s.trim() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(de::Error::custom(format!("expected a boolean, got '{}'", other))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "lenient_int")]
        n: i64,
    }

    #[derive(Debug, Deserialize)]
    struct Label {
        #[serde(default, deserialize_with = "nullable_string")]
        text: String,
        #[serde(default, deserialize_with = "lenient_int")]
        count: i64,
    }

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "lenient_bool")]
        on: bool,
    }

    fn parse(value: serde_json::Value) -> Result<i64, serde_json::Error> {
        serde_json::from_value::<Holder>(json!({ "n": value })).map(|h| h.n)
    }

    fn parse_flag(value: serde_json::Value) -> Result<bool, serde_json::Error> {
        serde_json::from_value::<Flag>(json!({ "on": value })).map(|f| f.on)
    }

    #[test]
    fn test_lenient_int_accepts_numbers_and_strings() {
        assert_eq!(parse(json!(7)).unwrap(), 7);
        assert_eq!(parse(json!("12")).unwrap(), 12);
        assert_eq!(parse(json!(" 3 ")).unwrap(), 3);
        assert_eq!(parse(json!(4.0)).unwrap(), 4);
    }

    #[test]
    fn test_lenient_int_rejects_garbage() {
        assert!(parse(json!("twelve")).is_err());
        assert!(parse(json!(1.5)).is_err());
    }

    #[test]
    fn test_lenient_bool() {
        assert!(parse_flag(json!(true)).unwrap());
        assert!(parse_flag(json!("true")).unwrap());
        assert!(!parse_flag(json!("false")).unwrap());
        assert!(parse_flag(json!("yes")).is_err());
    }

    #[test]
    fn test_null_reads_as_empty() {
        assert_eq!(parse(json!(null)).unwrap(), 0);
        assert!(!parse_flag(json!(null)).unwrap());

        let label: Label = serde_json::from_value(json!({ "text": null, "count": null })).unwrap();
        assert_eq!(label.text, "");
        assert_eq!(label.count, 0);
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let label: Label = serde_json::from_value(json!({})).unwrap();
        assert_eq!(label.text, "");
        assert_eq!(label.count, 0);
    }
}
