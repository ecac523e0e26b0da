use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ArticleId = u64;
pub type TagId = u64;
pub type CommentId = u64;

/// A blog article as returned by the backend.
/// List responses omit `comments`; detail responses omit `comments_count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_published: bool,
    /// Whether the backend considers the article recent.
    #[serde(default)]
    pub is_recent: bool,
    /// Number of approved comments. Only present in list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u32>,
}

impl Article {
    /// Whether any attached tag has the given name, compared
    /// case-insensitively.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.tags.iter().any(|tag| tag.name.to_lowercase() == name)
    }
}

/// A persisted tag. Tags not yet known to the backend never appear here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Comment {
    pub id: CommentId,
    /// The parent article.
    pub article: ArticleId,
    pub content: String,
    #[serde(default = "anonymous")]
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_approved: bool,
}

fn anonymous() -> String {
    "Anonymous".to_string()
}

/// A tag attached inline on article create/update. Only the name is sent;
/// the backend reuses or creates the tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct TagInput {
    pub name: String,
}

impl TagInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub tags: Vec<TagInput>,
}

/// Partial update of an article. Unset fields are left out of the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replaces the whole tag set when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl From<NewArticle> for ArticlePatch {
    fn from(article: NewArticle) -> Self {
        Self {
            title: Some(article.title),
            content: Some(article.content),
            tags: Some(article.tags),
            is_published: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct NewComment {
    pub content: String,
    pub article: ArticleId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct NewTag {
    pub name: String,
}

/// Optional server-side narrowing of the article list.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Full-text search over title and content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Field to order by, e.g. `-created_at`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

/// A page of results wrapped by the backend's paginator. Only `results` is
/// required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer either with a pagination envelope or a bare array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated(page) => page.results,
            Self::Bare(items) => items,
        }
    }
}
