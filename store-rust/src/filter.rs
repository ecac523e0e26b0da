use blog_client::{Article, Url};

/// Client-side narrowing of the article list by free text and tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Matched case-insensitively against title and content. Empty matches
    /// everything.
    pub search: String,
    /// Tag name matched case-insensitively. `None` or empty matches
    /// everything.
    pub tag: Option<String>,
}

impl ArticleFilter {
    pub fn new(search: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            search: search.into(),
            tag,
        }
    }

    /// Build a filter from the `tag` parameter of a URL query string such as
    /// `tag=web%20dev&page=2`.
    pub fn from_query(search: impl Into<String>, query: &str) -> Self {
        let tag = url_query_param(query, "tag").filter(|tag| !tag.is_empty());
        Self::new(search, tag)
    }

    pub fn clear_tag(&mut self) {
        self.tag = None;
    }

    /// The tag filter, if set and non-empty.
    pub fn active_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.active_tag().is_none()
    }

    pub fn matches(&self, article: &Article) -> bool {
        let matches_search = self.search.is_empty() || {
            let search = self.search.to_lowercase();
            article.title.to_lowercase().contains(&search)
                || article.content.to_lowercase().contains(&search)
        };

        let matches_tag = self.active_tag().is_none_or(|tag| article.has_tag(tag));

        matches_search && matches_tag
    }

    /// The articles passing the filter, in list order.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles
            .iter()
            .filter(|article| self.matches(article))
            .collect()
    }
}

/// Why a filtered list came out empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    NoTagMatch(String),
    NoSearchMatch(String),
    NoArticles,
}

impl EmptyReason {
    pub fn message(&self) -> String {
        match self {
            Self::NoTagMatch(tag) => format!("No articles found with tag \"{tag}\""),
            Self::NoSearchMatch(search) => format!("No articles found matching \"{search}\""),
            Self::NoArticles => "No articles available".to_string(),
        }
    }
}

/// The visible part of the article list for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub articles: Vec<&'a Article>,
    pub empty_reason: Option<EmptyReason>,
}

impl<'a> ListView<'a> {
    pub fn derive(articles: &'a [Article], filter: &ArticleFilter) -> Self {
        let visible = filter.apply(articles);
        let empty_reason = if visible.is_empty() {
            Some(if let Some(tag) = filter.active_tag() {
                EmptyReason::NoTagMatch(tag.to_string())
            } else if !filter.search.is_empty() {
                EmptyReason::NoSearchMatch(filter.search.clone())
            } else {
                EmptyReason::NoArticles
            })
        } else {
            None
        };

        Self {
            articles: visible,
            empty_reason,
        }
    }
}

/// Value of `name` in a URL query string, form-decoded. A leading `?` is
/// ignored.
fn url_query_param(query: &str, name: &str) -> Option<String> {
    let mut url = Url::parse("http://localhost/").ok()?;
    url.set_query(Some(query.trim_start_matches('?')));
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_client::Tag;
    use chrono::{TimeZone, Utc};

    fn article(id: u64, title: &str, content: &str, tags: &[&str]) -> Article {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        Article {
            id,
            title: title.to_string(),
            content: content.to_string(),
            tags: tags
                .iter()
                .enumerate()
                .map(|(i, name)| Tag {
                    id: i as u64 + 1,
                    name: (*name).to_string(),
                    created_at,
                })
                .collect(),
            comments: vec![],
            created_at,
            updated_at: created_at,
            is_published: true,
            is_recent: false,
            comments_count: None,
        }
    }

    fn sample() -> Vec<Article> {
        vec![
            article(1, "Rust Basics", "Ownership first.", &["Rust", "beginners"]),
            article(2, "Go Intro", "Goroutines and channels.", &["go"]),
            article(3, "Async in practice", "Futures in RUST code.", &["async"]),
        ]
    }

    fn ids(articles: &[&Article]) -> Vec<u64> {
        articles.iter().map(|a| a.id).collect()
    }

    #[test]
    fn empty_filter_returns_list_unchanged() {
        let articles = sample();
        let visible = ArticleFilter::default().apply(&articles);
        assert_eq!(ids(&visible), vec![1, 2, 3]);
        assert!(ArticleFilter::new("", Some(String::new())).is_empty());
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let articles = vec![
            article(1, "Rust Basics", "", &[]),
            article(2, "Go Intro", "", &[]),
        ];
        let visible = ArticleFilter::new("rust", None).apply(&articles);
        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn search_also_matches_content() {
        let articles = sample();
        let visible = ArticleFilter::new("rust", None).apply(&articles);
        assert_eq!(ids(&visible), vec![1, 3]);
    }

    #[test]
    fn tag_filter_requires_a_matching_tag_name() {
        let articles = sample();
        let filter = ArticleFilter::new("", Some("RUST".to_string()));
        let visible = filter.apply(&articles);
        assert_eq!(ids(&visible), vec![1]);
        assert!(visible.iter().all(|a| a.has_tag("rust")));
    }

    #[test]
    fn search_and_tag_combine() {
        let articles = sample();
        let filter = ArticleFilter::new("channels", Some("rust".to_string()));
        assert!(filter.apply(&articles).is_empty());

        let filter = ArticleFilter::new("ownership", Some("beginners".to_string()));
        assert_eq!(ids(&filter.apply(&articles)), vec![1]);
    }

    #[test]
    fn filtering_leaves_source_list_untouched() {
        let articles = sample();
        let before = articles.clone();
        let _ = ArticleFilter::new("go", Some("go".to_string())).apply(&articles);
        assert_eq!(articles, before);
    }

    #[test]
    fn empty_reason_prefers_tag_then_search_then_empty_list() {
        let articles = sample();

        let view = ListView::derive(&articles, &ArticleFilter::new("rust", Some("go".to_string())));
        assert_eq!(view.empty_reason, Some(EmptyReason::NoTagMatch("go".to_string())));
        assert_eq!(
            view.empty_reason.unwrap().message(),
            "No articles found with tag \"go\""
        );

        let view = ListView::derive(&articles, &ArticleFilter::new("python", None));
        assert_eq!(
            view.empty_reason,
            Some(EmptyReason::NoSearchMatch("python".to_string()))
        );

        let view = ListView::derive(&[], &ArticleFilter::default());
        assert_eq!(view.empty_reason, Some(EmptyReason::NoArticles));
        assert_eq!(EmptyReason::NoArticles.message(), "No articles available");

        let view = ListView::derive(&articles, &ArticleFilter::new("go", None));
        assert_eq!(view.empty_reason, None);
        assert_eq!(ids(&view.articles), vec![2]);
    }

    #[test]
    fn tag_is_read_from_query_string() {
        let filter = ArticleFilter::from_query("", "?page=2&tag=web%20dev");
        assert_eq!(filter.active_tag(), Some("web dev"));

        let filter = ArticleFilter::from_query("", "tag=machine+learning");
        assert_eq!(filter.active_tag(), Some("machine learning"));

        let filter = ArticleFilter::from_query("", "tag=c%2B%2B&tag=go");
        assert_eq!(filter.active_tag(), Some("c++"));

        let mut filter = ArticleFilter::from_query("rust", "tag=");
        assert_eq!(filter.active_tag(), None);
        filter.tag = Some("go".to_string());
        filter.clear_tag();
        assert!(filter.active_tag().is_none());
        assert_eq!(filter.search, "rust");
    }
}
