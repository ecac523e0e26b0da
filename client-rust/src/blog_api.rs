use crate::{
    ApiResult, Article, ArticleId, ArticlePatch, ArticleQuery, Comment, NewArticle, NewComment,
    NewTag, Tag, TagId,
};

/// One method per REST operation of the blog API.
///
/// Implementations return the backend's error unchanged; they never retry or
/// hide a failure.
#[async_trait::async_trait]
pub trait BlogApi: Send + Sync {
    /// `GET /articles/`
    async fn list_articles(&self, query: &ArticleQuery) -> ApiResult<Vec<Article>>;
    /// `GET /articles/{id}`
    async fn get_article(&self, id: ArticleId) -> ApiResult<Article>;
    /// `POST /articles/`
    async fn create_article(&self, article: &NewArticle) -> ApiResult<Article>;
    /// `PUT /articles/{id}/`
    async fn update_article(&self, id: ArticleId, patch: &ArticlePatch) -> ApiResult<Article>;
    /// `DELETE /articles/{id}/`
    async fn delete_article(&self, id: ArticleId) -> ApiResult<()>;
    /// `GET /articles/{id}/comments/`
    async fn list_comments(&self, article_id: ArticleId) -> ApiResult<Vec<Comment>>;
    /// `POST /articles/{id}/comments/`
    async fn create_comment(&self, article_id: ArticleId, comment: &NewComment)
        -> ApiResult<Comment>;
    /// `GET /tags/`
    async fn list_tags(&self) -> ApiResult<Vec<Tag>>;
    /// `POST /tags/`
    async fn create_tag(&self, tag: &NewTag) -> ApiResult<Tag>;
    /// `GET /tags/{id}/articles/`
    async fn tag_articles(&self, tag_id: TagId) -> ApiResult<Vec<Article>>;
}
