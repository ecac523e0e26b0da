mod articles;
mod config;
mod detail;
mod errors;
mod filter;
mod form;
mod lifecycle;
mod list_state;
mod tags;
pub mod validation;

pub use articles::ArticlesStore;
pub use config::{ApiSettings, AppConfig, Features};
pub use detail::{
    ArticleDetail, CommentKey, CommentView, DetailState, DetailStatus, PendingComment,
    FETCH_FAILED_MESSAGE,
};
pub use errors::{ConfigError, StoreError};
pub use filter::{ArticleFilter, EmptyReason, ListView};
pub use form::{validate_article, ArticleForm, FormErrors, FormMode, SelectedTag, TagKey};
pub use list_state::{FetchOutcome, ListState, LoadStatus};
pub use tags::TagsStore;
