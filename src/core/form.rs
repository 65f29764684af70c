//! Form payloads submitted by create/update operations

use crate::client::body::{RequestBody, Upload};
use validator::Validate;

/// A validated form that knows how to encode itself for the backend
///
/// Multipart entities put their image under a fixed field name; JSON
/// entities serialize their wire fields.
pub trait FormPayload: Validate + Send + Sync {
    fn to_body(&self) -> RequestBody;

    /// Attach a newly picked image; returns `false` if the form takes none
    fn attach_image(&mut self, _upload: Upload) -> bool {
        false
    }
}
