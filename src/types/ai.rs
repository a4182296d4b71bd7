//! Request bodies for the AI writing endpoints.

use serde::{Deserialize, Serialize};

/// Tone for [`PolishArticleRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolishStyle {
    #[default]
    Professional,
    Casual,
    Academic,
}

/// Draft a new article from a title.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateArticleRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub outline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

impl GenerateArticleRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = outline.into();
        self
    }

    pub fn with_word_count(mut self, words: u32) -> Self {
        self.word_count = Some(words);
        self
    }
}

/// Continue an existing draft.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContinueWritingRequest {
    pub existing_content: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub direction: String,
}

impl ContinueWritingRequest {
    pub fn new(existing_content: impl Into<String>) -> Self {
        Self {
            existing_content: existing_content.into(),
            direction: String::new(),
        }
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }
}

/// Rewrite content in a given style.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolishArticleRequest {
    pub content: String,
    pub style: PolishStyle,
}

impl PolishArticleRequest {
    pub fn new(content: impl Into<String>, style: PolishStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }
}

/// Expand an outline into prose.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpandOutlineRequest {
    pub outline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

impl ExpandOutlineRequest {
    pub fn new(outline: impl Into<String>) -> Self {
        Self {
            outline: outline.into(),
            word_count: None,
        }
    }

    pub fn with_word_count(mut self, words: u32) -> Self {
        self.word_count = Some(words);
        self
    }
}
