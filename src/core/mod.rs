//! Core traits and types shared by every entity and page

pub mod auth;
pub mod error;
pub mod field;
pub mod form;
pub mod record;
pub mod sort;
pub mod validation;

pub use auth::{FileSession, MemorySession, SessionProvider};
pub use error::{AdminError, Result};
pub use field::{FieldDef, FieldKind, FieldValue};
pub use form::FormPayload;
pub use record::{Editable, Record};
pub use sort::{Direction, SortKey, parse_sort_key};
