//! Session capability for authenticated backend access
//!
//! The dashboard authenticates every request with a single bearer token.
//! Instead of reading a global, data-access code receives a
//! [`SessionProvider`] and asks it for the token; when the backend rejects
//! the token the provider is cleared and told to send the operator back to
//! the login boundary.
//!
//! Two providers ship with the crate:
//! - [`MemorySession`]: token held in memory (tests, embedding front ends)
//! - [`FileSession`]: token persisted in a file (the CLI)

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Capability interface over the stored session token
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The stored token, if any
    async fn token(&self) -> Option<String>;

    /// Forget the stored token
    async fn clear(&self);

    /// Called once the session is known to be unusable (missing or rejected token)
    fn on_unauthorized(&self);
}

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// In-memory session
#[derive(Clone, Default)]
pub struct MemorySession {
    token: Arc<RwLock<Option<String>>>,
    unauthorized: Arc<AtomicUsize>,
    hook: Option<UnauthorizedHook>,
}

impl MemorySession {
    /// Create a session without a token
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.set_token(token);
        session
    }

    /// Run `hook` whenever the session becomes unauthorized (e.g. redirect to login)
    pub fn on_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    /// How many times the session was reported unauthorized
    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for MemorySession {
    async fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    async fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    fn on_unauthorized(&self) {
        self.unauthorized.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = &self.hook {
            hook();
        }
    }
}

/// Session persisted as a token file
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `token`, creating parent directories as needed
    pub async fn store(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, token.trim()).await
    }
}

#[async_trait]
impl SessionProvider for FileSession {
    async fn token(&self) -> Option<String> {
        let content = tokio::fs::read_to_string(&self.path).await.ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    async fn clear(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Session token removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove session token"),
        }
    }

    fn on_unauthorized(&self) {
        tracing::warn!("Not logged in; run `content-admin login --token <TOKEN>`");
    }
}
