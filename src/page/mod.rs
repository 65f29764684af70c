//! Page controllers
//!
//! An [`EntityPage`] is what a management screen holds while it is open: the
//! view model over the canonical collection, the client used to reach the
//! backend, and the page-scoped loading/submitting/error state. Every
//! successful mutation is followed by a full refetch; the canonical
//! collection is never patched locally.

use crate::client::ApiClient;
use crate::core::error::{AdminError, Result};
use crate::core::record::{Editable, Record};
use crate::view::ListViewModel;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// State and lifecycle of one management page
pub struct EntityPage<T: Record> {
    model: ListViewModel<T>,
    client: ApiClient,
    loading: bool,
    submitting: Arc<AtomicBool>,
    error: Option<String>,
}

impl<T: Record> EntityPage<T> {
    /// Open a page for `T`; nothing is fetched until [`load`](Self::load)
    pub fn new(client: ApiClient) -> Result<Self> {
        Ok(Self {
            model: ListViewModel::new()?,
            client,
            loading: false,
            submitting: Arc::new(AtomicBool::new(false)),
            error: None,
        })
    }

    /// Fetch the full collection and replace the canonical one.
    ///
    /// On failure the previous collection is kept and the error message is
    /// stored on the page.
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        let fetched = self.client.list::<T>().await;
        self.loading = false;

        let outcome = fetched.and_then(|records| self.model.replace(records));
        match outcome {
            Ok(()) => {
                self.error = None;
                info!(
                    entity = T::entity_name(),
                    count = self.model.canonical().len(),
                    "Page loaded"
                );
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Delete record `id`, then refetch
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        if let Err(e) = self.client.delete::<T>(id).await {
            return Err(self.fail(e));
        }
        info!(entity = T::entity_name(), id = %id, "Record deleted");
        self.load().await
    }

    /// Forget the collection and page state (the operator left the page)
    pub fn leave(&mut self) {
        self.model.clear();
        self.error = None;
    }

    pub fn view(&self) -> &[T] {
        self.model.view()
    }

    pub fn model(&self) -> &ListViewModel<T> {
        &self.model
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.model.find(id)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.model.set_search(term);
    }

    pub fn set_sort(&mut self, key: T::SortKey) {
        self.model.set_sort(key);
    }

    pub fn set_sort_str(&mut self, raw: &str) -> Result<()> {
        self.model.set_sort_str(raw)
    }

    /// Last error shown on the page, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    fn fail(&mut self, err: AdminError) -> AdminError {
        warn!(entity = T::entity_name(), error = %err, "Page operation failed");
        self.error = Some(err.operator_message());
        err
    }
}

impl<T: Editable> EntityPage<T> {
    /// Create (`id == None`) or update a record from `form`, then refetch.
    ///
    /// A second submission while one is in flight fails with
    /// [`AdminError::Busy`].
    pub async fn submit(&mut self, id: Option<&str>, form: &T::Form) -> Result<()> {
        let _in_flight = match InFlight::acquire(&self.submitting) {
            Ok(guard) => guard,
            Err(e) => return Err(self.fail(e)),
        };

        let saved = match id {
            Some(id) => self.client.update::<T>(id, form).await,
            None => self.client.create::<T>(form).await,
        };
        if let Err(e) = saved {
            return Err(self.fail(e));
        }

        info!(entity = T::entity_name(), id = ?id, "Record saved");
        self.load().await
    }
}

/// Marks a submission in flight until dropped
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| AdminError::Busy)?;
        Ok(Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
