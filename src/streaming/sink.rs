//! Stream sinks
//!
//! A sink is the capability set the decoder reports into. Every callback has
//! a no-op default, so a sink only implements what it cares about.

use tokio::sync::mpsc;

use crate::error::BlogError;

/// Receiver of decoder callbacks.
///
/// Per session: `on_delta` zero or more times, then at most one of
/// `on_done`, `on_error` or `on_cancelled`. Deltas delivered before an
/// error are never retracted.
pub trait StreamSink {
    fn on_delta(&mut self, _delta: &str) {}

    fn on_error(&mut self, _error: &BlogError) {}

    fn on_done(&mut self) {}

    /// Cancellation is a distinct outcome, not an error.
    fn on_cancelled(&mut self) {}
}

impl<T: StreamSink + ?Sized> StreamSink for &mut T {
    fn on_delta(&mut self, delta: &str) {
        (**self).on_delta(delta)
    }
    fn on_error(&mut self, error: &BlogError) {
        (**self).on_error(error)
    }
    fn on_done(&mut self) {
        (**self).on_done()
    }
    fn on_cancelled(&mut self) {
        (**self).on_cancelled()
    }
}

impl<T: StreamSink + ?Sized> StreamSink for Box<T> {
    fn on_delta(&mut self, delta: &str) {
        (**self).on_delta(delta)
    }
    fn on_error(&mut self, error: &BlogError) {
        (**self).on_error(error)
    }
    fn on_done(&mut self) {
        (**self).on_done()
    }
    fn on_cancelled(&mut self) {
        (**self).on_cancelled()
    }
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl StreamSink for NoopSink {}

/// Accumulates deltas into an editable text buffer.
///
/// The buffer survives errors and cancellation, so whatever was generated
/// before the stream stopped stays available.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    text: String,
    deltas: usize,
    error: Option<BlogError>,
    done: bool,
    cancelled: bool,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text, e.g. when continuing an article.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn delta_count(&self) -> usize {
        self.deltas
    }

    pub fn error(&self) -> Option<&BlogError> {
        self.error.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl StreamSink for CollectSink {
    fn on_delta(&mut self, delta: &str) {
        self.text.push_str(delta);
        self.deltas += 1;
    }

    fn on_error(&mut self, error: &BlogError) {
        self.error = Some(error.clone());
    }

    fn on_done(&mut self) {
        self.done = true;
    }

    fn on_cancelled(&mut self) {
        self.cancelled = true;
    }
}

/// Sink callbacks as values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Delta(String),
    Error(BlogError),
    Done,
    Cancelled,
}

/// Forwards callbacks over an unbounded channel.
///
/// A dropped receiver is not an error for the decoder: events are discarded
/// and the session runs to its natural end.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StreamEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<StreamEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: StreamEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("stream event receiver dropped");
        }
    }
}

impl StreamSink for ChannelSink {
    fn on_delta(&mut self, delta: &str) {
        self.send(StreamEvent::Delta(delta.to_string()));
    }

    fn on_error(&mut self, error: &BlogError) {
        self.send(StreamEvent::Error(error.clone()));
    }

    fn on_done(&mut self) {
        self.send(StreamEvent::Done);
    }

    fn on_cancelled(&mut self) {
        self.send(StreamEvent::Cancelled);
    }
}
