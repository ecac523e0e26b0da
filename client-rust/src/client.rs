use crate::{
    client_utils::{self, RequestContext},
    observer::{HttpObserver, TracingObserver},
    ApiError, ApiResult, Article, ArticleId, ArticlePatch, ArticleQuery, BlogApi, Comment,
    NewArticle, NewComment, NewTag, Tag, TagId,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use std::{sync::Arc, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// HTTP implementation of [`BlogApi`].
pub struct BlogClient {
    base_url: String,
    client: Client,
    observer: Arc<dyn HttpObserver>,
}

#[derive(Clone, Default)]
pub struct BlogClientOptions {
    pub base_url: Option<String>,
    /// Applies to every request. Ignored when `client` is supplied.
    pub timeout: Option<Duration>,
    pub client: Option<Client>,
    pub observer: Option<Arc<dyn HttpObserver>>,
}

impl BlogClient {
    pub fn new(options: BlogClientOptions) -> ApiResult<Self> {
        let BlogClientOptions {
            base_url,
            timeout,
            client,
            observer,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = match client {
            Some(client) => client,
            None => Client::builder()
                .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
                .default_headers(default_headers())
                .build()?,
        };

        Ok(Self {
            base_url,
            client,
            observer: observer.unwrap_or_else(|| Arc::new(TracingObserver)),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ctx(&self) -> RequestContext<'_> {
        RequestContext {
            client: &self.client,
            base_url: &self.base_url,
            observer: self.observer.as_ref(),
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Log a failed accessor call and hand the error back untouched.
fn log_failure<T>(result: ApiResult<T>, operation: &'static str) -> ApiResult<T> {
    if let Err(error) = &result {
        tracing::warn!(operation, %error, "Blog API call failed");
    }
    result
}

fn query_pairs(query: &ArticleQuery) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        pairs.push(("search", search.clone()));
    }
    if let Some(ordering) = &query.ordering {
        pairs.push(("ordering", ordering.clone()));
    }
    pairs
}

#[async_trait::async_trait]
impl BlogApi for BlogClient {
    async fn list_articles(&self, query: &ArticleQuery) -> ApiResult<Vec<Article>> {
        let result = client_utils::get_list(self.ctx(), "articles/", &query_pairs(query)).await;
        log_failure(result, "list_articles")
    }

    async fn get_article(&self, id: ArticleId) -> ApiResult<Article> {
        let path = format!("articles/{id}");
        let result =
            client_utils::send_json::<(), _>(self.ctx(), Method::GET, &path, None).await;
        log_failure(result, "get_article")
    }

    async fn create_article(&self, article: &NewArticle) -> ApiResult<Article> {
        let result =
            client_utils::send_json(self.ctx(), Method::POST, "articles/", Some(article)).await;
        log_failure(result, "create_article")
    }

    async fn update_article(&self, id: ArticleId, patch: &ArticlePatch) -> ApiResult<Article> {
        let path = format!("articles/{id}/");
        let result = client_utils::send_json(self.ctx(), Method::PUT, &path, Some(patch)).await;
        log_failure(result, "update_article")
    }

    async fn delete_article(&self, id: ArticleId) -> ApiResult<()> {
        let path = format!("articles/{id}/");
        let result = client_utils::send_empty(self.ctx(), Method::DELETE, &path).await;
        log_failure(result, "delete_article")
    }

    async fn list_comments(&self, article_id: ArticleId) -> ApiResult<Vec<Comment>> {
        let path = format!("articles/{article_id}/comments/");
        let result = client_utils::get_list(self.ctx(), &path, &[]).await;
        log_failure(result, "list_comments")
    }

    async fn create_comment(
        &self,
        article_id: ArticleId,
        comment: &NewComment,
    ) -> ApiResult<Comment> {
        if comment.article != article_id {
            return Err(ApiError::InvalidInput(format!(
                "Comment targets article {} but was posted to article {article_id}",
                comment.article
            )));
        }
        let path = format!("articles/{article_id}/comments/");
        let result = client_utils::send_json(self.ctx(), Method::POST, &path, Some(comment)).await;
        log_failure(result, "create_comment")
    }

    async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        let result = client_utils::get_list(self.ctx(), "tags/", &[]).await;
        if let Ok(tags) = &result {
            tracing::debug!(count = tags.len(), "Fetched tags");
        }
        log_failure(result, "list_tags")
    }

    async fn create_tag(&self, tag: &NewTag) -> ApiResult<Tag> {
        let result = client_utils::send_json(self.ctx(), Method::POST, "tags/", Some(tag)).await;
        log_failure(result, "create_tag")
    }

    async fn tag_articles(&self, tag_id: TagId) -> ApiResult<Vec<Article>> {
        let path = format!("tags/{tag_id}/articles/");
        let result = client_utils::get_list(self.ctx(), &path, &[]).await;
        log_failure(result, "tag_articles")
    }
}
