use std::{collections::VecDeque, sync::Mutex};

use futures::channel::oneshot;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    ApiError, ApiResult, Article, ArticleId, ArticlePatch, ArticleQuery, BlogApi, Comment,
    NewArticle, NewComment, NewTag, Tag, TagId,
};

/// Result for one mocked call.
/// The payload is kept as JSON and decoded into whatever the called method
/// returns, so a single queue serves every endpoint.
pub enum MockResult {
    Json(serde_json::Value),
    Error(ApiError),
    /// Resolved later through the paired [`MockResponder`].
    Deferred(oneshot::Receiver<MockResult>),
}

impl MockResult {
    /// Construct a result that yields the serialized value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        serde_json::to_value(value).map_or_else(
            |error| Self::Error(ApiError::Invariant(format!("unserializable mock value: {error}"))),
            Self::Json,
        )
    }

    /// Construct a result for calls without a response body.
    pub fn ok() -> Self {
        Self::Json(serde_json::Value::Null)
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ApiError) -> Self {
        Self::Error(error)
    }

    /// Construct a result that stays pending until the responder is used.
    pub fn deferred() -> (Self, MockResponder) {
        let (sender, receiver) = oneshot::channel();
        (Self::Deferred(receiver), MockResponder { sender })
    }
}

impl From<ApiError> for MockResult {
    fn from(error: ApiError) -> Self {
        Self::error(error)
    }
}

impl From<Article> for MockResult {
    fn from(article: Article) -> Self {
        Self::json(&article)
    }
}

impl From<Vec<Article>> for MockResult {
    fn from(articles: Vec<Article>) -> Self {
        Self::json(&articles)
    }
}

impl From<Tag> for MockResult {
    fn from(tag: Tag) -> Self {
        Self::json(&tag)
    }
}

impl From<Vec<Tag>> for MockResult {
    fn from(tags: Vec<Tag>) -> Self {
        Self::json(&tags)
    }
}

impl From<Comment> for MockResult {
    fn from(comment: Comment) -> Self {
        Self::json(&comment)
    }
}

impl From<Vec<Comment>> for MockResult {
    fn from(comments: Vec<Comment>) -> Self {
        Self::json(&comments)
    }
}

/// Completes a [`MockResult::deferred`] result.
pub struct MockResponder {
    sender: oneshot::Sender<MockResult>,
}

impl MockResponder {
    /// Resolve the pending call. Does nothing if the call was dropped.
    pub fn respond<R: Into<MockResult>>(self, result: R) {
        let _ = self.sender.send(result.into());
    }
}

/// A call received by the mock, with its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ListArticles(ArticleQuery),
    GetArticle(ArticleId),
    CreateArticle(NewArticle),
    UpdateArticle(ArticleId, ArticlePatch),
    DeleteArticle(ArticleId),
    ListComments(ArticleId),
    CreateComment(ArticleId, NewComment),
    ListTags,
    CreateTag(NewTag),
    TagArticles(TagId),
}

#[derive(Default)]
struct MockBlogApiState {
    mocked_results: VecDeque<MockResult>,
    tracked_calls: Vec<MockCall>,
}

/// A mock [`BlogApi`] that tracks calls and yields predefined results in
/// FIFO order, whatever the endpoint.
#[derive(Default)]
pub struct MockBlogApi {
    state: Mutex<MockBlogApiState>,
}

impl MockBlogApi {
    /// Construct a new mock with no queued results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one or more mocked results.
    pub fn enqueue_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked result.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult>,
    {
        self.enqueue_results(std::iter::once(result.into()))
    }

    /// Retrieve the calls received so far.
    pub fn tracked_calls(&self) -> Vec<MockCall> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.clone()
    }

    /// Number of queued results not yet consumed.
    pub fn pending_results(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.len()
    }

    /// Reset tracked calls without touching enqueued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.clear();
    }

    /// Clear both tracked calls and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.clear();
        state.mocked_results.clear();
    }

    fn next_result(&self, call: MockCall) -> ApiResult<MockResult> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.push(call);
        state
            .mocked_results
            .pop_front()
            .ok_or_else(|| ApiError::Invariant("no mocked results available".to_string()))
    }

    async fn call<R: DeserializeOwned>(&self, call: MockCall) -> ApiResult<R> {
        let mut result = self.next_result(call)?;
        loop {
            match result {
                MockResult::Json(value) => {
                    return serde_json::from_value(value).map_err(|error| {
                        ApiError::Invariant(format!("mocked result has the wrong shape: {error}"))
                    });
                }
                MockResult::Error(error) => return Err(error),
                MockResult::Deferred(receiver) => {
                    result = receiver.await.map_err(|_| {
                        ApiError::Invariant("deferred mock result was dropped".to_string())
                    })?;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl BlogApi for MockBlogApi {
    async fn list_articles(&self, query: &ArticleQuery) -> ApiResult<Vec<Article>> {
        self.call(MockCall::ListArticles(query.clone())).await
    }

    async fn get_article(&self, id: ArticleId) -> ApiResult<Article> {
        self.call(MockCall::GetArticle(id)).await
    }

    async fn create_article(&self, article: &NewArticle) -> ApiResult<Article> {
        self.call(MockCall::CreateArticle(article.clone())).await
    }

    async fn update_article(&self, id: ArticleId, patch: &ArticlePatch) -> ApiResult<Article> {
        self.call(MockCall::UpdateArticle(id, patch.clone())).await
    }

    async fn delete_article(&self, id: ArticleId) -> ApiResult<()> {
        self.call(MockCall::DeleteArticle(id)).await
    }

    async fn list_comments(&self, article_id: ArticleId) -> ApiResult<Vec<Comment>> {
        self.call(MockCall::ListComments(article_id)).await
    }

    async fn create_comment(
        &self,
        article_id: ArticleId,
        comment: &NewComment,
    ) -> ApiResult<Comment> {
        self.call(MockCall::CreateComment(article_id, comment.clone()))
            .await
    }

    async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        self.call(MockCall::ListTags).await
    }

    async fn create_tag(&self, tag: &NewTag) -> ApiResult<Tag> {
        self.call(MockCall::CreateTag(tag.clone())).await
    }

    async fn tag_articles(&self, tag_id: TagId) -> ApiResult<Vec<Article>> {
        self.call(MockCall::TagArticles(tag_id)).await
    }
}
