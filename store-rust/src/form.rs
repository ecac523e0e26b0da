use crate::{validation, ArticlesStore, StoreError};
use blog_client::{Article, ArticleId, ArticlePatch, NewArticle, Tag, TagId, TagInput};
use std::fmt;
use uuid::Uuid;

/// Identifies a selected tag: persisted tags by backend id, tags typed into
/// the form by a placeholder that never leaves the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey {
    Persisted(TagId),
    Placeholder(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedTag {
    Existing(Tag),
    /// Typed into the form; created by the backend on submission.
    Pending { key: Uuid, name: String },
}

impl SelectedTag {
    pub fn key(&self) -> TagKey {
        match self {
            Self::Existing(tag) => TagKey::Persisted(tag.id),
            Self::Pending { key, .. } => TagKey::Placeholder(*key),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Existing(tag) => &tag.name,
            Self::Pending { name, .. } => name,
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [&self.title, &self.content, &self.tags]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// Check an article draft without touching the network.
pub fn validate_article(title: &str, content: &str, tag_count: usize) -> FormErrors {
    FormErrors {
        title: validation::validate_title(title).err(),
        content: validation::validate_content(content).err(),
        tags: validation::validate_tag_count(tag_count).err(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ArticleId),
}

/// Local state of the article create/edit form.
#[derive(Debug, Clone)]
pub struct ArticleForm {
    mode: FormMode,
    pub title: String,
    pub content: String,
    /// Text of the "new tag" input.
    pub new_tag: String,
    selected_tags: Vec<SelectedTag>,
    errors: FormErrors,
    submitting: bool,
}

impl Default for ArticleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleForm {
    /// An empty form creating a new article.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            content: String::new(),
            new_tag: String::new(),
            selected_tags: Vec::new(),
            errors: FormErrors::default(),
            submitting: false,
        }
    }

    /// A form prefilled from an existing article; submitting updates it.
    #[must_use]
    pub fn edit(article: &Article) -> Self {
        Self {
            mode: FormMode::Edit(article.id),
            title: article.title.clone(),
            content: article.content.clone(),
            selected_tags: article
                .tags
                .iter()
                .cloned()
                .map(SelectedTag::Existing)
                .collect(),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub fn selected_tags(&self) -> &[SelectedTag] {
        &self.selected_tags
    }

    #[must_use]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Add the typed tag unless it is blank or already selected under any
    /// casing. Clears the input on success.
    pub fn add_new_tag(&mut self) -> bool {
        let name = self.new_tag.trim();
        if name.is_empty() {
            return false;
        }
        let lowered = name.to_lowercase();
        if self
            .selected_tags
            .iter()
            .any(|tag| tag.name().to_lowercase() == lowered)
        {
            return false;
        }

        self.selected_tags.push(SelectedTag::Pending {
            key: Uuid::new_v4(),
            name: name.to_string(),
        });
        self.new_tag.clear();
        true
    }

    /// Select a persisted tag from `available` unless it is already selected.
    pub fn select_existing(&mut self, available: &[Tag], id: TagId) -> bool {
        let Some(tag) = available.iter().find(|tag| tag.id == id) else {
            return false;
        };
        if self.selected_tags.iter().any(|selected| selected.key() == TagKey::Persisted(id)) {
            return false;
        }
        self.selected_tags.push(SelectedTag::Existing(tag.clone()));
        true
    }

    pub fn remove_tag(&mut self, key: TagKey) -> bool {
        let before = self.selected_tags.len();
        self.selected_tags.retain(|tag| tag.key() != key);
        self.selected_tags.len() != before
    }

    /// Validate every field and keep the messages for display.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_article(&self.title, &self.content, self.selected_tags.len());
        self.errors.is_empty()
    }

    /// The payload sent to the backend: trimmed text and tag names only.
    #[must_use]
    pub fn request(&self) -> NewArticle {
        NewArticle {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            tags: self
                .selected_tags
                .iter()
                .map(|tag| TagInput::new(tag.name()))
                .collect(),
        }
    }

    /// Validate, then create or update the article through `store`.
    /// Invalid input is rejected before any request is made.
    pub async fn submit(&mut self, store: &ArticlesStore) -> Result<Article, StoreError> {
        if !self.validate() {
            return Err(StoreError::Validation(self.errors.clone()));
        }

        let request = self.request();
        tracing::debug!(title = %request.title, tags = request.tags.len(), "Submitting article");

        let mode = self.mode;
        let _submitting = SubmittingFlag::raise(&mut self.submitting);
        match mode {
            FormMode::Create => store.create_article(&request).await,
            FormMode::Edit(id) => store.update_article(id, &ArticlePatch::from(request)).await,
        }
    }
}

/// Holds `submitting` up for as long as a submission is in flight, including
/// when the submitting future is dropped before it completes.
struct SubmittingFlag<'a>(&'a mut bool);

impl<'a> SubmittingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
