//! Comment endpoints.

use reqwest::Method;

use super::BlogClient;
use crate::error::Result;
use crate::types::{Comment, NewComment};

impl BlogClient {
    /// Comments on an article, newest first.
    pub async fn comments(&self, article_id: u64) -> Result<Vec<Comment>> {
        self.send(self.request(Method::GET, &format!("/comments/{article_id}")))
            .await
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.send(self.request(Method::POST, "/comments").json(comment))
            .await
    }

    pub async fn delete_comment(&self, id: u64) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/comments/{id}")))
            .await
    }
}
