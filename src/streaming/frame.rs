//! Frame parsing
//!
//! A frame is one decoded `data:` line. Lines without the data prefix are
//! not frames at all and never reach the sink.

use serde::Deserialize;

use super::DecoderConfig;

/// Discriminant of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Data,
    Done,
    Malformed,
}

/// JSON record carried by a data frame: `{"content": ...}` or `{"error": ...}`.
///
/// Both fields must be strings when present. A record where either is some
/// other JSON type (a number, or an `{"error": {"message": ...}}` object)
/// does not deserialize and is reported as [`Frame::Malformed`], so the
/// decoder drops it with a warning instead of raising it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FramePayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FramePayload {
    /// The text delta, if the record carries a non-empty one.
    pub fn delta(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// The error message, if the record carries a non-empty one.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// One decoded protocol unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A well-formed JSON record.
    Data(FramePayload),
    /// The end sentinel.
    Done,
    /// A data line whose payload is not a valid record.
    Malformed { raw: String, reason: String },
}

impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Data(_) => FrameKind::Data,
            Frame::Done => FrameKind::Done,
            Frame::Malformed { .. } => FrameKind::Malformed,
        }
    }

    /// Parse one complete line.
    ///
    /// Returns `None` for blank lines and lines without the data prefix
    /// (comments, `event:` lines, keep-alives).
    pub fn parse_line(line: &str, config: &DecoderConfig) -> Option<Frame> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let payload = line.strip_prefix(config.data_prefix.as_str())?;

        if payload == config.done_marker {
            return Some(Frame::Done);
        }

        Some(match serde_json::from_str::<FramePayload>(payload) {
            Ok(record) => Frame::Data(record),
            Err(e) => Frame::Malformed {
                raw: payload.to_string(),
                reason: e.to_string(),
            },
        })
    }
}
