use crate::form::FormErrors;
use blog_client::{ApiError, ArticleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend call failed. Displays the API error's own message.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Local validation blocked the submission; nothing was sent.
    #[error("{0}")]
    Validation(FormErrors),
    #[error("{0}")]
    InvalidTag(String),
    #[error("The {0} feature is disabled")]
    FeatureDisabled(&'static str),
    /// The operation needs an article that has not been loaded.
    #[error("Article {0} is not loaded")]
    NotLoaded(ArticleId),
}

impl StoreError {
    /// Whether the backend reported the resource missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(error) if error.is_not_found())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
