//! Decoder configuration.

/// Prefix that marks an event line.
pub const DEFAULT_DATA_PREFIX: &str = "data: ";
/// Payload that marks an explicit end of stream.
pub const DEFAULT_DONE_MARKER: &str = "[DONE]";

/// Knobs for [`crate::streaming::StreamDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Lines not starting with this prefix (after trimming) are ignored.
    pub data_prefix: String,
    /// Payload that terminates the stream.
    pub done_marker: String,
    /// Parse a leftover unterminated line once the body ends.
    ///
    /// Off by default: the backend always terminates records with a blank
    /// line, so a dangling fragment means the connection was cut mid-record.
    pub flush_trailing_line: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            data_prefix: DEFAULT_DATA_PREFIX.to_string(),
            done_marker: DEFAULT_DONE_MARKER.to_string(),
            flush_trailing_line: false,
        }
    }
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.data_prefix = prefix.into();
        self
    }

    pub fn with_done_marker(mut self, marker: impl Into<String>) -> Self {
        self.done_marker = marker.into();
        self
    }

    pub fn flush_trailing_line(mut self, flush: bool) -> Self {
        self.flush_trailing_line = flush;
        self
    }
}
