//! Cancellation utilities
//!
//! Provides a cooperative cancellation handle for stream sessions and
//! in-flight requests.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
///
/// The handle is owned by the caller; the decoder only observes it. Clones
/// share the same underlying token.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new, uncancelled handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Sessions observing this handle stop reading as
    /// soon as possible; a read that is already pending is abandoned, which
    /// drops the response body and closes the HTTP connection.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// A handle cancelled together with this one, but cancellable on its own.
    ///
    /// Useful for aborting a single session without tearing down a whole
    /// editor's worth of requests.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Cancel this handle when the returned guard is dropped.
    pub fn drop_guard(self) -> tokio_util::sync::DropGuard {
        self.token.drop_guard()
    }

    /// Drive `future` to completion unless cancellation wins first.
    ///
    /// Returns `None` when cancelled. Cancellation is checked before the
    /// future is polled, so an already-cancelled handle never polls it.
    pub async fn run_until_cancelled<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = future => Some(out),
        }
    }
}
