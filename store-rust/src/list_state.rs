use crate::{lifecycle::Lifecycle, StoreError};
use blog_client::{ApiResult, Article, Tag};
use std::future::Future;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Snapshot of a list store.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    /// Message of the last failed fetch or mutation.
    pub error: Option<String>,
    pub status: LoadStatus,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            status: LoadStatus::Idle,
        }
    }
}

/// What happened to the result of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced.
    Applied,
    /// The fetch failed; the error was recorded and the list kept.
    Failed,
    /// A newer fetch started meanwhile; this result was dropped.
    Superseded,
    /// The store was disposed; this result was dropped.
    Discarded,
}

/// Entities addressed by a backend identifier.
pub(crate) trait Keyed {
    fn key(&self) -> u64;
}

impl Keyed for Article {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for Tag {
    fn key(&self) -> u64 {
        self.id
    }
}

/// State and bookkeeping shared by the list stores.
pub(crate) struct ListResource<T> {
    label: &'static str,
    state: watch::Sender<ListState<T>>,
    lifecycle: Lifecycle,
}

impl<T> ListResource<T>
where
    T: Keyed + Clone + Send + Sync,
{
    pub fn new(label: &'static str) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            label,
            state,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.state.borrow().status
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }

    /// Replace the list with the result of `request`, unless a newer fetch
    /// started or the store was disposed in the meantime.
    pub async fn fetch<F>(&self, request: F) -> FetchOutcome
    where
        F: Future<Output = ApiResult<Vec<T>>>,
    {
        if !self.lifecycle.is_live() {
            return FetchOutcome::Discarded;
        }

        let ticket = self.lifecycle.begin();
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            state.status = LoadStatus::Loading;
        });

        let result = request.await;

        if !self.lifecycle.is_live() {
            return FetchOutcome::Discarded;
        }
        if !self.lifecycle.is_current(ticket) {
            tracing::debug!(resource = self.label, "Dropping superseded fetch result");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(items) => {
                self.state.send_modify(|state| {
                    state.items = items;
                    state.loading = false;
                    state.error = None;
                    state.status = LoadStatus::Ready;
                });
                FetchOutcome::Applied
            }
            Err(error) => {
                tracing::error!(resource = self.label, %error, "Error fetching list");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(error.to_string());
                    state.status = LoadStatus::Errored;
                });
                FetchOutcome::Failed
            }
        }
    }

    /// Run a mutation and, on success, patch the list with `apply`.
    /// On failure the error is recorded and returned; the list is untouched.
    pub async fn mutate<R, F>(
        &self,
        operation: &'static str,
        request: F,
        apply: impl FnOnce(&mut Vec<T>, &R),
    ) -> Result<R, StoreError>
    where
        F: Future<Output = ApiResult<R>>,
    {
        if self.lifecycle.is_live() {
            self.state.send_modify(|state| state.error = None);
        }

        let result = request.await;

        if !self.lifecycle.is_live() {
            return result.map_err(StoreError::from);
        }

        match result {
            Ok(value) => {
                self.state.send_modify(|state| apply(&mut state.items, &value));
                Ok(value)
            }
            Err(error) => {
                tracing::error!(resource = self.label, operation, %error, "Mutation failed");
                self.state
                    .send_modify(|state| state.error = Some(error.to_string()));
                Err(error.into())
            }
        }
    }
}

/// Put `item` at the front of the list.
pub(crate) fn prepend<T: Clone>(items: &mut Vec<T>, item: &T) {
    items.insert(0, item.clone());
}

/// Replace the entity with the same key in place, keeping list order.
pub(crate) fn replace<T: Keyed + Clone>(items: &mut [T], item: &T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.key() == item.key()) {
        *slot = item.clone();
    }
}

/// Drop every entity with the given key.
pub(crate) fn remove<T: Keyed>(items: &mut Vec<T>, key: u64) {
    items.retain(|existing| existing.key() != key);
}
