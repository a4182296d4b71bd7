//! Article endpoints.

use reqwest::Method;

use super::BlogClient;
use crate::error::Result;
use crate::types::{
    Article, ArticleList, ArticleListQuery, CreateArticleRequest, UpdateArticleRequest,
};

/// Page size used by search when the caller does not pick one.
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 10;

impl BlogClient {
    /// One page of articles.
    pub async fn articles(&self, query: &ArticleListQuery) -> Result<ArticleList> {
        self.send(self.request(Method::GET, "/articles").query(query))
            .await
    }

    pub async fn article(&self, id: u64) -> Result<Article> {
        self.send(self.request(Method::GET, &format!("/articles/{id}")))
            .await
    }

    pub async fn create_article(&self, req: &CreateArticleRequest) -> Result<Article> {
        self.send(self.request(Method::POST, "/articles").json(req))
            .await
    }

    pub async fn update_article(&self, id: u64, req: &UpdateArticleRequest) -> Result<Article> {
        self.send(self.request(Method::PUT, &format!("/articles/{id}")).json(req))
            .await
    }

    pub async fn delete_article(&self, id: u64) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/articles/{id}")))
            .await
    }

    /// Full-text search. `page` and `page_size` default to 1 and 10.
    pub async fn search_articles(
        &self,
        keyword: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<ArticleList> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_SEARCH_PAGE_SIZE);
        self.send(self.request(Method::GET, "/articles/search").query(&[
            ("keyword", keyword.to_string()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ]))
        .await
    }
}
