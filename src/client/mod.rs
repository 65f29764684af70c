//! Authenticated data access to the content backend
//!
//! [`ApiClient`] is the single place requests are built: it attaches the
//! bearer token, encodes form payloads, and intercepts 403 responses to tear
//! the session down. Pages never talk to `reqwest` directly.

pub mod body;
pub mod endpoint;

pub use body::{MultipartForm, RequestBody, Upload};
pub use endpoint::Endpoints;

use crate::config::AdminConfig;
use crate::core::auth::SessionProvider;
use crate::core::error::{AdminError, Result};
use crate::core::form::FormPayload;
use crate::core::record::{Editable, Record};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use validator::Validate;

const USER_AGENT: &str = concat!("content-admin/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one backend and one session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &AdminConfig, session: Arc<dyn SessionProvider>) -> Result<Self> {
        Self::build(&config.api_url, config.request_timeout(), session)
    }

    /// Create a client for `base_url` with the default timeout
    pub fn with_base_url(base_url: &str, session: Arc<dyn SessionProvider>) -> Result<Self> {
        Self::build(base_url, AdminConfig::default().request_timeout(), session)
    }

    fn build(base_url: &str, timeout: Duration, session: Arc<dyn SessionProvider>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| AdminError::Config(format!("invalid API URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(AdminError::Config(format!(
                "invalid API URL '{}': not a base URL",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AdminError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: parsed,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    /// Fetch the full collection of `T`, in backend order
    pub async fn list<T: Record>(&self) -> Result<Vec<T>> {
        let url = self.url(T::endpoints().list, None)?;
        let request = self.authorized(Method::GET, url).await?;
        let response = self
            .send(request, format!("Failed to fetch {}", T::plural_name()))
            .await?;

        let bytes = response.bytes().await?;
        let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|e| AdminError::Decode {
            entity: T::entity_name(),
            message: e.to_string(),
        })?;

        debug!(entity = T::entity_name(), count = records.len(), "Fetched records");
        Ok(records)
    }

    /// Create a record of `T` from a form
    pub async fn create<T: Editable>(&self, form: &T::Form) -> Result<()> {
        let path = T::endpoints().create.ok_or(AdminError::Unsupported {
            entity: T::entity_name(),
            operation: "create",
        })?;
        form.validate()?;

        let url = self.url(path, None)?;
        let request = self.authorized(Method::POST, url).await?;
        let request = attach_body(request, form)?;
        self.send(request, format!("Failed to save {}", T::entity_name()))
            .await?;

        debug!(entity = T::entity_name(), "Created record");
        Ok(())
    }

    /// Replace the record `id` of `T` with a form
    pub async fn update<T: Editable>(&self, id: &str, form: &T::Form) -> Result<()> {
        let base = T::endpoints().update.ok_or(AdminError::Unsupported {
            entity: T::entity_name(),
            operation: "update",
        })?;
        form.validate()?;

        let url = self.url(base, Some(record_id::<T>(id)?))?;
        let request = self.authorized(Method::PUT, url).await?;
        let request = attach_body(request, form)?;
        self.send(request, format!("Failed to save {}", T::entity_name()))
            .await?;

        debug!(entity = T::entity_name(), id = %id, "Updated record");
        Ok(())
    }

    /// Delete the record `id` of `T`
    pub async fn delete<T: Record>(&self, id: &str) -> Result<()> {
        let base = T::endpoints().delete.ok_or(AdminError::Unsupported {
            entity: T::entity_name(),
            operation: "delete",
        })?;

        let url = self.url(base, Some(record_id::<T>(id)?))?;
        let request = self.authorized(Method::DELETE, url).await?;
        self.send(request, format!("Failed to delete {}", T::entity_name()))
            .await?;

        debug!(entity = T::entity_name(), id = %id, "Deleted record");
        Ok(())
    }

    /// Start a request carrying the session's bearer token.
    ///
    /// Without a token nothing is sent and the session is reported unauthorized.
    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let Some(token) = self.session.token().await else {
            warn!(url = %url, "No authentication token found");
            self.session.on_unauthorized();
            return Err(AdminError::MissingCredential);
        };

        debug!(method = %method, url = %url, "Sending request");
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Resolve an endpoint path under the base URL.
    ///
    /// The record `id` becomes exactly one percent-encoded path segment, so
    /// `/`, `?` or `#` inside it never change the resource addressed.
    fn url(&self, path: &str, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AdminError::Config(format!("invalid API URL '{}'", self.base_url)))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Send a request and map non-success statuses.
    ///
    /// 403 clears the session before returning [`AdminError::Forbidden`].
    async fn send(&self, request: RequestBuilder, fallback: String) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            AdminError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::FORBIDDEN {
            warn!(url = %response.url(), "Backend rejected the session token");
            self.session.clear().await;
            self.session.on_unauthorized();
            return Err(AdminError::Forbidden);
        }

        let message = error_message(response).await.unwrap_or(fallback);
        warn!(status = %status, message = %message, "Backend returned an error");
        Err(AdminError::Http { status, message })
    }
}

/// Identifiers that cannot stand as a path segment of their own
fn record_id<T: Record>(id: &str) -> Result<&str> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(AdminError::Validation(format!(
            "invalid {} id '{}'",
            T::entity_name(),
            id
        )));
    }
    Ok(id)
}

fn attach_body<F: FormPayload>(request: RequestBuilder, form: &F) -> Result<RequestBuilder> {
    Ok(match form.to_body() {
        RequestBody::Json(value) => request.json(&value),
        RequestBody::Multipart(multipart) => request.multipart(multipart.into_reqwest()?),
    })
}

/// The backend's `message` field, when the error body carries one
async fn error_message(response: Response) -> Option<String> {
    let bytes = response.bytes().await.ok()?;
    let body: Value = serde_json::from_slice(&bytes).ok()?;
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
