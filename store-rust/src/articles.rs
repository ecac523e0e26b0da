use crate::{
    list_state::{self, FetchOutcome, ListResource, ListState, LoadStatus},
    StoreError,
};
use blog_client::{Article, ArticleId, ArticlePatch, ArticleQuery, BlogApi, NewArticle};
use std::sync::Arc;
use tokio::sync::watch;

/// Cached article list with loading/error status and mutations that keep the
/// cache in step with the backend.
///
/// Each store owns its cache. Stores and detail views do not share state.
pub struct ArticlesStore {
    api: Arc<dyn BlogApi>,
    query: ArticleQuery,
    resource: ListResource<Article>,
}

impl ArticlesStore {
    /// Create an idle store. Nothing is fetched until [`Self::fetch_articles`].
    #[must_use]
    pub fn new(api: Arc<dyn BlogApi>) -> Self {
        Self {
            api,
            query: ArticleQuery::default(),
            resource: ListResource::new("articles"),
        }
    }

    /// Create a store and perform its initial fetch.
    pub async fn mount(api: Arc<dyn BlogApi>) -> Self {
        let store = Self::new(api);
        store.fetch_articles().await;
        store
    }

    /// Narrow the fetched list on the server side.
    #[must_use]
    pub fn with_query(mut self, query: ArticleQuery) -> Self {
        self.query = query;
        self
    }

    /// Refetch the whole list. A failure is recorded in the store rather than
    /// returned; previously fetched articles stay in place.
    pub async fn fetch_articles(&self) -> FetchOutcome {
        self.resource
            .fetch(self.api.list_articles(&self.query))
            .await
    }

    /// Create an article and put it at the front of the list.
    pub async fn create_article(&self, article: &NewArticle) -> Result<Article, StoreError> {
        self.resource
            .mutate(
                "create_article",
                self.api.create_article(article),
                list_state::prepend,
            )
            .await
    }

    /// Update an article and replace the cached copy in place.
    pub async fn update_article(
        &self,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Article, StoreError> {
        self.resource
            .mutate(
                "update_article",
                self.api.update_article(id, patch),
                |items, updated: &Article| list_state::replace(items, updated),
            )
            .await
    }

    /// Delete an article and drop it from the list.
    pub async fn delete_article(&self, id: ArticleId) -> Result<(), StoreError> {
        self.resource
            .mutate(
                "delete_article",
                self.api.delete_article(id),
                |items, _: &()| list_state::remove(items, id),
            )
            .await
    }

    #[must_use]
    pub fn articles(&self) -> Vec<Article> {
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
    pub fn snapshot(&self) -> ListState<Article> {
        self.resource.snapshot()
    }

    /// Receive a new snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState<Article>> {
        self.resource.subscribe()
    }

    /// Stop applying results. Calls still in flight complete but leave the
    /// state untouched.
    pub fn dispose(&self) {
        self.resource.dispose();
    }
}
