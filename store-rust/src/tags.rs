use crate::{
    list_state::{FetchOutcome, Keyed, ListResource, ListState, LoadStatus},
    validation, StoreError,
};
use blog_client::{BlogApi, NewTag, Tag};
use std::sync::Arc;
use tokio::sync::watch;

/// Cached list of all tags, used to offer existing tags in the article form.
pub struct TagsStore {
    api: Arc<dyn BlogApi>,
    resource: ListResource<Tag>,
}

impl TagsStore {
    #[must_use]
    pub fn new(api: Arc<dyn BlogApi>) -> Self {
        Self {
            api,
            resource: ListResource::new("tags"),
        }
    }

    pub async fn mount(api: Arc<dyn BlogApi>) -> Self {
        let store = Self::new(api);
        store.fetch_tags().await;
        store
    }

    pub async fn fetch_tags(&self) -> FetchOutcome {
        self.resource.fetch(self.api.list_tags()).await
    }

    /// Persist a new tag and add it to the list. The name is checked locally
    /// first; an invalid name never reaches the backend.
    pub async fn create_tag(&self, name: &str) -> Result<Tag, StoreError> {
        validation::validate_tag_name(name).map_err(StoreError::InvalidTag)?;
        let request = NewTag {
            name: name.trim().to_string(),
        };

        self.resource
            .mutate("create_tag", self.api.create_tag(&request), |items, tag: &Tag| {
                match items.iter_mut().find(|existing| existing.key() == tag.id) {
                    Some(existing) => *existing = tag.clone(),
                    None => items.push(tag.clone()),
                }
            })
            .await
    }

    /// Look up a cached tag by name, case-insensitively.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Tag> {
        let name = name.to_lowercase();
        self.resource
            .items()
            .into_iter()
            .find(|tag| tag.name.to_lowercase() == name)
    }

    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        self.resource.items()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.resource.loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.resource.error()
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.resource.status()
    }

    #[must_use]
    pub fn snapshot(&self) -> ListState<Tag> {
        self.resource.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState<Tag>> {
        self.resource.subscribe()
    }

    pub fn dispose(&self) {
        self.resource.dispose();
    }
}
