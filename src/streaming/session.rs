//! Per-invocation decode state.

use crate::utils::Utf8StreamDecoder;

/// Ephemeral state for one decode pass.
///
/// `buffer` only ever holds the trailing fragment after the last newline;
/// complete lines are handed out once by [`StreamSession::push_chunk`] and
/// never kept.
#[derive(Debug, Default)]
pub struct StreamSession {
    buffer: String,
    utf8: Utf8StreamDecoder,
    cancelled: bool,
    finished: bool,
}

impl StreamSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk and return the lines it completed, in order.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.utf8.decode(chunk);
        self.buffer.push_str(&text);

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);
        complete[..last_newline]
            .split('\n')
            .map(str::to_owned)
            .collect()
    }

    /// Drain whatever is left once the body has ended.
    ///
    /// Returns `None` when nothing but whitespace remains.
    pub fn take_trailing(&mut self) -> Option<String> {
        let tail = self.utf8.flush();
        self.buffer.push_str(&tail);
        let rest = std::mem::take(&mut self.buffer);
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    /// The unconsumed partial line.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
        self.buffer.clear();
    }

    pub fn mark_finished(&mut self) {
        self.finished = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
