use crate::{
    lifecycle::{Lifecycle, Ticket},
    StoreError,
};
use blog_client::{ApiError, Article, ArticleId, BlogApi, Comment, CommentId, NewComment};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

pub const FETCH_FAILED_MESSAGE: &str = "Article not found or failed to fetch.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The backend answered 404.
    NotFound,
    /// Any other failure, with the error's message.
    Failed(String),
}

impl DetailStatus {
    /// Text to show in place of the article, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Idle | Self::Loaded => None,
            Self::Loading => Some("Loading..."),
            Self::NotFound | Self::Failed(_) => Some(FETCH_FAILED_MESSAGE),
        }
    }
}

/// A comment shown locally after it was posted, until the next reload
/// brings the backend's copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    pub key: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Latest reload ticket when the post completed.
    posted_at: Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKey {
    Persisted(CommentId),
    Pending(Uuid),
}

/// A comment as displayed: either from the backend or pending locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentView<'a> {
    Persisted(&'a Comment),
    Pending(&'a PendingComment),
}

impl<'a> CommentView<'a> {
    pub fn key(&self) -> CommentKey {
        match self {
            Self::Persisted(comment) => CommentKey::Persisted(comment.id),
            Self::Pending(comment) => CommentKey::Pending(comment.key),
        }
    }

    pub fn content(&self) -> &'a str {
        match *self {
            Self::Persisted(comment) => &comment.content,
            Self::Pending(comment) => &comment.content,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Persisted(comment) => comment.created_at,
            Self::Pending(comment) => comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    pub status: DetailStatus,
    pub article: Option<Article>,
    pub pending_comments: Vec<PendingComment>,
    /// Message of the last failed comment submission.
    pub comment_error: Option<String>,
}

impl DetailState {
    /// Backend comments followed by pending ones, in posting order.
    pub fn comments(&self) -> impl Iterator<Item = CommentView<'_>> {
        self.article
            .iter()
            .flat_map(|article| article.comments.iter().map(CommentView::Persisted))
            .chain(self.pending_comments.iter().map(CommentView::Pending))
    }
}

/// One article and its comments, loaded on its own and never synchronized
/// with an [`crate::ArticlesStore`].
pub struct ArticleDetail {
    api: Arc<dyn BlogApi>,
    id: ArticleId,
    comments_enabled: bool,
    state: watch::Sender<DetailState>,
    lifecycle: Lifecycle,
}

impl ArticleDetail {
    #[must_use]
    pub fn new(api: Arc<dyn BlogApi>, id: ArticleId) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            api,
            id,
            comments_enabled: true,
            state,
            lifecycle: Lifecycle::default(),
        }
    }

    /// Create the view and load the article.
    pub async fn mount(api: Arc<dyn BlogApi>, id: ArticleId) -> Self {
        let detail = Self::new(api, id);
        detail.reload().await;
        detail
    }

    #[must_use]
    pub fn with_comments_enabled(mut self, enabled: bool) -> Self {
        self.comments_enabled = enabled;
        self
    }

    #[must_use]
    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// Fetch the article again. The backend's copy replaces the local one,
    /// pending comments included, except those posted after the reload
    /// started.
    pub async fn reload(&self) -> DetailStatus {
        if !self.lifecycle.is_live() {
            return self.status();
        }

        let ticket = self.lifecycle.begin();
        self.state
            .send_modify(|state| state.status = DetailStatus::Loading);

        let result = self.api.get_article(self.id).await;

        if !self.lifecycle.is_current(ticket) {
            return self.status();
        }

        self.state.send_modify(|state| match result {
            Ok(article) => {
                // Keep comments posted while this reload was in flight unless
                // the backend copy already has them.
                state.pending_comments.retain(|pending| {
                    pending.posted_at >= ticket
                        && !article
                            .comments
                            .iter()
                            .any(|comment| comment.content == pending.content)
                });
                state.article = Some(article);
                state.comment_error = None;
                state.status = DetailStatus::Loaded;
            }
            Err(ApiError::NotFound) => {
                tracing::error!(article_id = self.id, "Article not found");
                state.article = None;
                state.pending_comments.clear();
                state.status = DetailStatus::NotFound;
            }
            Err(error) => {
                tracing::error!(article_id = self.id, %error, "Error fetching article");
                state.status = DetailStatus::Failed(error.to_string());
            }
        });
        self.status()
    }

    /// Post a comment and show it right away without reloading.
    ///
    /// Blank content is ignored and yields `Ok(None)`. On failure nothing is
    /// added and the error is both recorded and returned.
    pub async fn submit_comment(&self, content: &str) -> Result<Option<PendingComment>, StoreError> {
        if !self.comments_enabled {
            return Err(StoreError::FeatureDisabled("comments"));
        }
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        if self.state.borrow().article.is_none() {
            return Err(StoreError::NotLoaded(self.id));
        }

        let request = NewComment {
            content: content.to_string(),
            article: self.id,
            author_name: None,
        };

        match self.api.create_comment(self.id, &request).await {
            Ok(_) => {
                let pending = PendingComment {
                    key: Uuid::new_v4(),
                    content: request.content,
                    created_at: Utc::now(),
                    posted_at: self.lifecycle.latest(),
                };
                if self.lifecycle.is_live() {
                    self.state.send_modify(|state| {
                        state.pending_comments.push(pending.clone());
                        state.comment_error = None;
                    });
                }
                Ok(Some(pending))
            }
            Err(error) => {
                tracing::error!(article_id = self.id, %error, "Error adding comment");
                if self.lifecycle.is_live() {
                    self.state
                        .send_modify(|state| state.comment_error = Some(error.to_string()));
                }
                Err(error.into())
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> DetailStatus {
        self.state.borrow().status.clone()
    }

    #[must_use]
    pub fn article(&self) -> Option<Article> {
        self.state.borrow().article.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> DetailState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}
