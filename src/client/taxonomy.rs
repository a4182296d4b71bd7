//! Category and tag endpoints.

use reqwest::Method;

use super::BlogClient;
use crate::error::Result;
use crate::types::{Category, CategoryRequest, Tag, TagRequest};

impl BlogClient {
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.send(self.request(Method::GET, "/categories")).await
    }

    pub async fn create_category(&self, req: &CategoryRequest) -> Result<Category> {
        self.send(self.request(Method::POST, "/categories").json(req))
            .await
    }

    pub async fn update_category(&self, id: u64, req: &CategoryRequest) -> Result<Category> {
        self.send(self.request(Method::PUT, &format!("/categories/{id}")).json(req))
            .await
    }

    pub async fn delete_category(&self, id: u64) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/categories/{id}")))
            .await
    }

    pub async fn tags(&self) -> Result<Vec<Tag>> {
        self.send(self.request(Method::GET, "/tags")).await
    }

    pub async fn create_tag(&self, req: &TagRequest) -> Result<Tag> {
        self.send(self.request(Method::POST, "/tags").json(req)).await
    }

    pub async fn delete_tag(&self, id: u64) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/tags/{id}")))
            .await
    }
}
