//! Transport abstraction for streamed bodies.
//!
//! The decoder does not talk to `reqwest` directly; it consumes a status code
//! and a lazy stream of byte chunks. That keeps it usable with any HTTP stack
//! and lets tests feed it hand-made chunk sequences.

use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::error::{BlogError, Result};

/// Boxed, non-restartable body stream.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// A response whose body has not been read yet.
pub struct StreamResponse {
    status: u16,
    body: ByteStream,
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl StreamResponse {
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self { status, body }
    }

    /// Build a response from in-memory chunks.
    pub fn from_chunks<I, B>(status: u16, chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        I::IntoIter: Send + 'static,
        B: Into<Bytes>,
    {
        let body = futures::stream::iter(
            chunks
                .into_iter()
                .map(|c| Ok::<Bytes, BlogError>(c.into())),
        );
        Self::new(status, Box::pin(body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_body(self) -> ByteStream {
        self.body
    }

    /// Read the whole body as text (lossy UTF-8).
    pub async fn text(self) -> Result<String> {
        let mut body = self.body;
        let mut buf = Vec::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl From<reqwest::Response> for StreamResponse {
    fn from(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| BlogError::network(format!("Stream error: {e}"))));
        Self::new(status, Box::pin(body))
    }
}
