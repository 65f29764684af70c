//! Backend endpoint descriptors

/// Where the backend serves one entity type
///
/// `update` and `delete` are base paths; the record identifier is appended
/// as one encoded path segment (`PUT /episode/:id`). `None` means the backend
/// does not offer the operation for this entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub list: &'static str,
    pub create: Option<&'static str>,
    pub update: Option<&'static str>,
    pub delete: Option<&'static str>,
}

impl Endpoints {
    /// List-only entity
    pub const fn read_only(list: &'static str) -> Self {
        Self {
            list,
            create: None,
            update: None,
            delete: None,
        }
    }

    /// Entity with list, create, update and delete under one path
    pub const fn crud(path: &'static str) -> Self {
        Self {
            list: path,
            create: Some(path),
            update: Some(path),
            delete: Some(path),
        }
    }
}
