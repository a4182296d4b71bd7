//! Stream Decoder
//!
//! Turns a chunked `text/event-stream` body into text deltas delivered to a
//! [`StreamSink`].
//!
//! The body is read chunk by chunk; bytes are decoded to text with state that
//! persists across chunks, appended to the session buffer and split into
//! lines. Only `data: ` lines matter:
//!
//! ```text
//! data: {"content":"Hello"}
//!
//! data: {"content":" world"}
//!
//! data: [DONE]
//! ```
//!
//! A session ends on the `[DONE]` sentinel, on natural end of body, on an
//! `{"error": ...}` record, on a transport failure, or when the caller's
//! [`CancelHandle`] fires.

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{
    ChannelSink, DecoderConfig, Frame, StreamEvent, StreamResponse, StreamSession, StreamSink,
};
use crate::error::{BlogError, error_from_status};
use crate::utils::CancelHandle;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The stream finished; `sentinel` tells whether `[DONE]` was seen.
    Completed { sentinel: bool },
    /// A transport error or an error record stopped the stream.
    Failed(BlogError),
    /// The caller cancelled.
    Cancelled,
}

impl StreamOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn error(&self) -> Option<&BlogError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of handling one line.
enum LineControl {
    Continue,
    Stop(StreamOutcome),
}

/// Decoder for SSE-style AI writing streams.
///
/// The decoder itself is stateless; all per-call state lives in a fresh
/// [`StreamSession`], so one decoder can serve any number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    config: DecoderConfig,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Consume `response`, reporting into `sink` until the stream ends.
    ///
    /// The sink sees exactly one terminal callback: `on_done`, `on_error` or
    /// `on_cancelled`. The same outcome is returned.
    pub async fn consume<S>(
        &self,
        response: StreamResponse,
        sink: &mut S,
        cancel: &CancelHandle,
    ) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        let mut session = StreamSession::new();

        if cancel.is_cancelled() {
            return Self::cancelled(&mut session, sink);
        }

        if !response.is_success() {
            let status = response.status();
            let body = match cancel.run_until_cancelled(response.text()).await {
                None => return Self::cancelled(&mut session, sink),
                Some(Ok(body)) => body,
                Some(Err(e)) => {
                    tracing::debug!("Failed to read error body (status {status}): {e}");
                    String::new()
                }
            };
            let err = error_from_status(status, &body);
            tracing::error!("Stream request failed with status {status}: {err}");
            return Self::fail(&mut session, sink, err);
        }

        tracing::debug!("Stream opened (status {})", response.status());
        let mut body = response.into_body();

        loop {
            let next = match cancel.run_until_cancelled(body.next()).await {
                None => return Self::cancelled(&mut session, sink),
                Some(next) => next,
            };

            let chunk = match next {
                None => break,
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    tracing::error!("Stream read failed: {e}");
                    return Self::fail(&mut session, sink, e);
                }
            };

            for line in session.push_chunk(&chunk) {
                if cancel.is_cancelled() {
                    return Self::cancelled(&mut session, sink);
                }
                if let LineControl::Stop(outcome) = self.process_line(&line, &mut session, sink) {
                    return outcome;
                }
            }
        }

        if cancel.is_cancelled() {
            return Self::cancelled(&mut session, sink);
        }

        if let Some(trailing) = session.take_trailing() {
            if self.config.flush_trailing_line {
                if let LineControl::Stop(outcome) =
                    self.process_line(&trailing, &mut session, sink)
                {
                    return outcome;
                }
                if cancel.is_cancelled() {
                    return Self::cancelled(&mut session, sink);
                }
            } else {
                tracing::debug!("Discarding unterminated trailing line: {trailing:?}");
            }
        }

        tracing::debug!("Stream ended without sentinel");
        session.mark_finished();
        sink.on_done();
        StreamOutcome::Completed { sentinel: false }
    }

    /// Run [`consume`](Self::consume) on a tokio task and receive callbacks
    /// as [`StreamEvent`]s.
    pub fn spawn(
        &self,
        response: StreamResponse,
        cancel: CancelHandle,
    ) -> (JoinHandle<StreamOutcome>, mpsc::UnboundedReceiver<StreamEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let decoder = self.clone();
        let handle = tokio::spawn(async move {
            let mut sink = ChannelSink::new(tx);
            decoder.consume(response, &mut sink, &cancel).await
        });
        (handle, rx)
    }

    /// Events of a spawned session as a `Stream`.
    ///
    /// Dropping the stream cancels the session.
    pub fn event_stream(
        &self,
        response: StreamResponse,
        cancel: CancelHandle,
    ) -> impl Stream<Item = StreamEvent> + Send + use<> {
        let session = cancel.child();
        let (_handle, mut rx) = self.spawn(response, session.clone());
        let guard = session.drop_guard();
        async_stream::stream! {
            let _guard = guard;
            while let Some(event) = rx.recv().await {
                yield event;
            }
        }
    }

    fn process_line<S>(
        &self,
        line: &str,
        session: &mut StreamSession,
        sink: &mut S,
    ) -> LineControl
    where
        S: StreamSink + ?Sized,
    {
        let Some(frame) = Frame::parse_line(line, &self.config) else {
            return LineControl::Continue;
        };

        match frame {
            Frame::Done => {
                tracing::debug!("Stream sentinel received");
                session.mark_finished();
                sink.on_done();
                LineControl::Stop(StreamOutcome::Completed { sentinel: true })
            }
            Frame::Malformed { raw, reason } => {
                tracing::warn!("Dropping malformed stream record {raw:?}: {reason}");
                LineControl::Continue
            }
            Frame::Data(payload) => {
                if let Some(delta) = payload.delta() {
                    sink.on_delta(delta);
                    LineControl::Continue
                } else if let Some(message) = payload.error_message() {
                    tracing::error!("Stream reported error: {message}");
                    LineControl::Stop(Self::fail(
                        session,
                        sink,
                        BlogError::Stream(message.to_string()),
                    ))
                } else {
                    LineControl::Continue
                }
            }
        }
    }

    fn fail<S>(session: &mut StreamSession, sink: &mut S, err: BlogError) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        session.mark_finished();
        sink.on_error(&err);
        StreamOutcome::Failed(err)
    }

    fn cancelled<S>(session: &mut StreamSession, sink: &mut S) -> StreamOutcome
    where
        S: StreamSink + ?Sized,
    {
        tracing::debug!("Stream cancelled");
        session.mark_cancelled();
        sink.on_cancelled();
        StreamOutcome::Cancelled
    }
}
