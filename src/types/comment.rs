//! Reader comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub article_id: u64,
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment as submitted by a reader.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub article_id: u64,
    pub nickname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub content: String,
}

impl NewComment {
    pub fn new(article_id: u64, nickname: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            article_id,
            nickname: nickname.into(),
            email: String::new(),
            content: content.into(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}
