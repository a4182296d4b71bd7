//! Mock API tests for the blog client
//!
//! A wiremock server stands in for the blog backend; responses use its
//! `{code, message, data}` envelope and `text/event-stream` AI bodies.

use inkpost::prelude::*;
use inkpost::SettingsCache;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "code": 0, "message": "success", "data": data })
}

fn article_json(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "body",
        "summary": "",
        "author_id": 1,
        "status": "published",
        "view_count": 3,
        "created_at": "2024-05-01T08:00:00Z",
        "updated_at": "2024-05-02T08:00:00Z"
    })
}

fn client_for(server: &MockServer) -> BlogClient {
    BlogClient::new(ClientConfig::new(format!("{}/api", server.uri()))).expect("client")
}

#[tokio::test]
async fn article_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(article_json(7, "Hello"))))
        .expect(1)
        .mount(&server)
        .await;

    let article = client_for(&server).article(7).await.expect("article");
    assert_eq!(article.id, 7);
    assert_eq!(article.title, "Hello");
    assert_eq!(article.status, ArticleStatus::Published);
}

#[tokio::test]
async fn nonzero_code_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tags/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 4003, "message": "tag in use", "data": null })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).delete_tag(3).await.unwrap_err();
    assert_eq!(
        err,
        BlogError::Api {
            code: 4003,
            message: "tag in use".into()
        }
    );
}

#[tokio::test]
async fn login_stores_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_partial_json(json!({ "username": "admin", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "token": "tok-1", "user": null }))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.has_token());
    let resp = client.login("admin", "pw").await.expect("login");
    assert_eq!(resp.token, "tok-1");
    assert!(client.has_token());

    let categories = client.categories().await.expect("categories");
    assert!(categories.is_empty());
}

#[tokio::test]
async fn unauthorized_clears_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "code": 401, "message": "token expired", "data": null })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token("stale");
    let err = client.settings().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "token expired");
    assert!(!client.has_token());
}

#[tokio::test]
async fn server_error_without_envelope_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).tags().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn search_sends_default_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/search"))
        .and(query_param("keyword", "rust async"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "total": 11,
            "page": 1,
            "page_size": 10,
            "list": [article_json(1, "Rust async")]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_articles("rust async", None, None)
        .await
        .expect("search");
    assert_eq!(page.list.len(), 1);
    assert_eq!(page.total_pages(), 2);
    assert!(page.has_next_page());
}

#[tokio::test]
async fn comment_round_trip() {
    let server = MockServer::start().await;
    let comment = json!({
        "id": 5,
        "article_id": 2,
        "nickname": "reader",
        "content": "Nice post",
        "created_at": "2024-05-03T10:00:00Z"
    });
    Mock::given(method("POST"))
        .and(path("/api/comments"))
        .and(body_partial_json(json!({ "article_id": 2, "nickname": "reader" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(comment.clone())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/comments/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([comment]))))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/comments/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_comment(&NewComment::new(2, "reader", "Nice post"))
        .await
        .expect("create");
    assert_eq!(created.id, 5);
    assert!(created.email.is_empty());

    let listed = client.comments(2).await.expect("list");
    assert_eq!(listed, vec![created]);

    client.delete_comment(5).await.expect("delete");
}

#[tokio::test]
async fn cached_settings_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "site_name": "Inkpost",
            "posts_per_page": "12",
            "enable_comments": "true"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cache = SettingsCache::new();
    let first = client.cached_settings(&cache, false).await.expect("settings");
    let second = client.cached_settings(&cache, false).await.expect("cached");

    assert_eq!(first, second);
    assert_eq!(second.get("site_name", "Blog"), "Inkpost");
    assert_eq!(second.get_number("posts_per_page", 10), 12);
    assert!(second.get_bool("enable_comments", false));
}

#[tokio::test]
async fn generate_article_streams_deltas() {
    let server = MockServer::start().await;
    let body = concat!(
        "data: {\"content\":\"# Ownership\"}\n\n",
        "data: {\"content\":\"\\n\\nEvery value has an owner.\"}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/api/ai/generate"))
        .and(header("Accept", "text/event-stream"))
        .and(body_partial_json(json!({ "title": "Ownership" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut sink = CollectSink::new();
    let outcome = client_for(&server)
        .generate_article(
            &GenerateArticleRequest::new("Ownership"),
            &mut sink,
            &CancelHandle::new(),
        )
        .await;

    assert_eq!(outcome, StreamOutcome::Completed { sentinel: true });
    assert_eq!(sink.text(), "# Ownership\n\nEvery value has an owner.");
    assert!(sink.is_done());
}

#[tokio::test]
async fn polish_article_reports_error_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/polish"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string("event: error\ndata: {\"error\":\"quota exceeded\"}\n\n"),
        )
        .mount(&server)
        .await;

    let mut sink = CollectSink::new();
    let outcome = client_for(&server)
        .polish_article(
            &PolishArticleRequest::new("draft", PolishStyle::Casual),
            &mut sink,
            &CancelHandle::new(),
        )
        .await;

    assert_eq!(
        outcome,
        StreamOutcome::Failed(BlogError::Stream("quota exceeded".into()))
    );
    assert_eq!(sink.error(), Some(&BlogError::Stream("quota exceeded".into())));
    assert!(!sink.is_done());
}

#[tokio::test]
async fn stream_unauthorized_clears_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/expand"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "login required" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token("stale");
    let mut sink = CollectSink::new();
    let outcome = client
        .expand_outline(
            &ExpandOutlineRequest::new("- intro"),
            &mut sink,
            &CancelHandle::new(),
        )
        .await;

    let err = outcome.error().expect("failed outcome");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "login required");
    assert!(!client.has_token());
    assert_eq!(sink.delta_count(), 0);
}

#[tokio::test]
async fn cancelled_before_response_never_calls_sink_with_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/continue"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(5))
                .set_body_string("data: {\"content\":\"late\"}\n"),
        )
        .mount(&server)
        .await;

    let cancel = CancelHandle::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let mut sink = CollectSink::new();
    let outcome = client_for(&server)
        .continue_writing(&ContinueWritingRequest::new("Once upon"), &mut sink, &cancel)
        .await;

    assert!(outcome.is_cancelled());
    assert!(sink.is_cancelled());
    assert_eq!(sink.delta_count(), 0);
}

fn taxonomy_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "created_at": "2024-05-01T08:00:00Z",
        "updated_at": "2024-05-01T08:00:00Z"
    })
}

#[tokio::test]
async fn articles_sends_list_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "5"))
        .and(query_param("category_id", "4"))
        .and(query_param("status", "published"))
        .and(query_param("show_all", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "total": 6,
            "page": 2,
            "page_size": 5,
            "list": [article_json(6, "Sixth")]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let query = ArticleListQuery::new()
        .page(2, 5)
        .category(4)
        .status(ArticleStatus::Published)
        .show_all(true);
    let page = client_for(&server).articles(&query).await.expect("articles");

    assert_eq!(page.list[0].id, 6);
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn article_create_update_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .and(body_json(json!({
            "title": "Draft",
            "content": "text",
            "category_ids": [1],
            "tag_ids": [],
            "status": "draft"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(article_json(9, "Draft"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/articles/9"))
        .and(body_json(json!({ "title": "Final", "status": "published" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(article_json(9, "Final"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/articles/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_article(&CreateArticleRequest {
            title: "Draft".into(),
            content: "text".into(),
            category_ids: vec![1],
            ..Default::default()
        })
        .await
        .expect("create");
    assert_eq!(created.id, 9);

    let updated = client
        .update_article(
            9,
            &UpdateArticleRequest {
                title: Some("Final".into()),
                status: Some(ArticleStatus::Published),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.title, "Final");

    client.delete_article(9).await.expect("delete");
}

#[tokio::test]
async fn category_create_update_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(body_json(json!({ "name": "Rust", "description": "Systems" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(taxonomy_json(2, "Rust"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/2"))
        .and(body_json(json!({ "name": "Rustlang" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(taxonomy_json(2, "Rustlang"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_category(&CategoryRequest::new("Rust").with_description("Systems"))
        .await
        .expect("create");
    assert_eq!(created.name, "Rust");
    assert!(created.description.is_empty());

    let renamed = client
        .update_category(2, &CategoryRequest::new("Rustlang"))
        .await
        .expect("update");
    assert_eq!(renamed.name, "Rustlang");

    client.delete_category(2).await.expect("delete");
}

#[tokio::test]
async fn create_tag_posts_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .and(body_json(json!({ "name": "async" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(taxonomy_json(8, "async"))))
        .expect(1)
        .mount(&server)
        .await;

    let tag = client_for(&server)
        .create_tag(&TagRequest::new("async"))
        .await
        .expect("tag");
    assert_eq!(tag.id, 8);
    assert_eq!(tag.name, "async");
}

#[tokio::test]
async fn change_password_posts_both_passwords() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/password"))
        .and(header("Authorization", "Bearer tok-2"))
        .and(body_json(json!({ "old_password": "old", "new_password": "new" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token("tok-2");
    client.change_password("old", "new").await.expect("change password");
}

#[tokio::test]
async fn update_settings_puts_flat_map() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/settings"))
        .and(body_json(json!({ "site_name": "Inkpost", "posts_per_page": "20" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = Settings::new();
    settings.insert("site_name", "Inkpost");
    settings.insert("posts_per_page", "20");
    client_for(&server)
        .update_settings(&settings)
        .await
        .expect("update settings");
}

#[tokio::test]
async fn logout_stops_sending_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token("tok-3");
    client.tags().await.expect("tags with token");
    client.logout();
    assert!(!client.has_token());
    client.tags().await.expect("tags without token");

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer tok-3")
    );
    assert!(requests[1].headers.get("authorization").is_none());
}
