//! AI writing endpoints.
//!
//! Each call POSTs a JSON request and feeds the `text/event-stream` response
//! to the client's [`StreamDecoder`](crate::streaming::StreamDecoder). The
//! outcome is both reported to the sink and returned.

use reqwest::Method;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING};
use serde::Serialize;

use super::BlogClient;
use crate::error::BlogError;
use crate::streaming::{StreamOutcome, StreamSink};
use crate::types::{
    ContinueWritingRequest, ExpandOutlineRequest, GenerateArticleRequest, PolishArticleRequest,
};
use crate::utils::CancelHandle;

impl BlogClient {
    /// Draft an article from a title, keywords and optional outline.
    pub async fn generate_article<S>(
        &self,
        req: &GenerateArticleRequest,
        sink: &mut S,
        cancel: &CancelHandle,
    ) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        self.stream("/ai/generate", req, sink, cancel).await
    }

    /// Continue an existing draft.
    pub async fn continue_writing<S>(
        &self,
        req: &ContinueWritingRequest,
        sink: &mut S,
        cancel: &CancelHandle,
    ) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        self.stream("/ai/continue", req, sink, cancel).await
    }

    /// Rewrite content in the requested style.
    pub async fn polish_article<S>(
        &self,
        req: &PolishArticleRequest,
        sink: &mut S,
        cancel: &CancelHandle,
    ) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        self.stream("/ai/polish", req, sink, cancel).await
    }

    /// Expand an outline into prose.
    pub async fn expand_outline<S>(
        &self,
        req: &ExpandOutlineRequest,
        sink: &mut S,
        cancel: &CancelHandle,
    ) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        self.stream("/ai/expand", req, sink, cancel).await
    }

    async fn stream<B, S>(
        &self,
        path: &str,
        body: &B,
        sink: &mut S,
        cancel: &CancelHandle,
    ) -> StreamOutcome
    where
        B: Serialize + ?Sized,
        S: StreamSink + ?Sized,
    {
        let mut builder = self
            .request(Method::POST, path)
            .json(body)
            .header(ACCEPT, "text/event-stream");
        if self.config.stream_disable_compression {
            builder = builder.header(ACCEPT_ENCODING, "identity");
        }

        let response = match cancel.run_until_cancelled(builder.send()).await {
            None => {
                tracing::debug!("Stream request to {path} cancelled before response");
                sink.on_cancelled();
                return StreamOutcome::Cancelled;
            }
            Some(Err(e)) => {
                tracing::error!("Stream request to {path} failed: {e}");
                let err = BlogError::network(format!("Failed to send request: {e}"));
                sink.on_error(&err);
                return StreamOutcome::Failed(err);
            }
            Some(Ok(response)) => response,
        };

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Unauthorized stream response, dropping stored token");
            self.clear_token();
        }

        self.decoder.consume(response.into(), sink, cancel).await
    }
}
