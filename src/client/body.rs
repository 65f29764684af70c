//! Request bodies sent by mutating operations

use crate::core::error::{AdminError, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Body of a create/update request
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartForm),
}

/// An image picked for upload
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Wrap in-memory bytes, guessing the content type from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AdminError::Io(format!("{}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// Multipart form: ordered text fields plus at most one file part
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    text: IndexMap<String, String>,
    file: Option<(String, Upload)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field (a later value for the same name replaces the earlier one)
    pub fn text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.text.insert(name.into(), value.to_string());
        self
    }

    /// Attach the image field.
    ///
    /// A newly picked file is sent as a file part only. Without one, the
    /// existing image reference (if any) is sent back as a text field so the
    /// backend keeps it.
    pub fn image(mut self, name: &str, existing: Option<&str>, upload: Option<&Upload>) -> Self {
        match (upload, existing) {
            (Some(upload), _) => {
                self.text.shift_remove(name);
                self.file = Some((name.to_string(), upload.clone()));
            }
            (None, Some(reference)) if !reference.is_empty() => {
                self.text.insert(name.to_string(), reference.to_string());
            }
            _ => {}
        }
        self
    }

    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.text.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// The file part, as (field name, upload)
    pub fn file_part(&self) -> Option<(&str, &Upload)> {
        self.file.as_ref().map(|(name, upload)| (name.as_str(), upload))
    }

    /// Convert into a `reqwest` multipart form
    pub fn into_reqwest(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.text {
            form = form.text(name, value);
        }
        if let Some((name, upload)) = self.file {
            let part = reqwest::multipart::Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(&upload.content_type)
                .map_err(|e| AdminError::Io(format!("invalid upload content type: {}", e)))?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}
