//! # content-admin
//!
//! Administrative tooling for the content entities of a media platform
//! (users, episodes, seasons, single stories, force-update flags) served by a
//! REST backend.
//!
//! ## Features
//!
//! - **Generic list view**: one [`ListViewModel`](view::ListViewModel) per entity, driven by a field-accessor table
//! - **Closed sort keys**: per-entity enums declared with [`sort_keys!`], parsed from `"<field>-<direction>"`
//! - **Authenticated access**: bearer token from a [`SessionProvider`](core::auth::SessionProvider), centralized 403 handling
//! - **Forms**: validated payloads sent as JSON or multipart (with image upload)
//! - **Pages**: load, submit and delete with a full refetch after every mutation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use content_admin::prelude::*;
//!
//! let session = Arc::new(MemorySession::with_token(token));
//! let client = ApiClient::new(&AdminConfig::default(), session)?;
//!
//! let mut page = EntityPage::<Episode>::new(client)?;
//! page.load().await?;
//! page.set_search("cat");
//! page.set_sort(EpisodeSort::StoryNumberDesc);
//!
//! for episode in page.view() {
//!     println!("{} {}", episode.story_number, episode.story_title);
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod entities;
pub mod page;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{FileSession, MemorySession, SessionProvider},
        error::{AdminError, Result},
        field::{FieldDef, FieldKind, FieldValue},
        form::FormPayload,
        record::{Editable, Record},
        sort::{Direction, SortKey},
    };

    // === Macros ===
    pub use crate::sort_keys;

    // === Entities ===
    pub use crate::entities::{
        Episode, EpisodeForm, EpisodeSort, ForceUpdate, ForceUpdateForm, ForceUpdateSort, Season,
        SeasonForm, SeasonSort, SingleStory, SingleStoryForm, SingleStorySort, User, UserSort,
    };

    // === Data access ===
    pub use crate::client::{ApiClient, Endpoints, MultipartForm, RequestBody, Upload};

    // === Pages ===
    pub use crate::page::EntityPage;
    pub use crate::view::{ListViewModel, apply};

    // === Config ===
    pub use crate::config::AdminConfig;

    // === External dependencies ===
    pub use std::sync::Arc;
}
