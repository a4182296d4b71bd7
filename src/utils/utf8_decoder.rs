//! Incremental UTF-8 decoding for chunked byte streams.
//!
//! HTTP bodies arrive in arbitrary chunks, so a multi-byte character can be
//! split across two reads. [`Utf8StreamDecoder`] carries the incomplete tail
//! of one chunk over to the next instead of decoding each chunk on its own.

/// Stateful UTF-8 decoder.
///
/// Invalid sequences are replaced with U+FFFD; an incomplete sequence at the
/// end of a chunk is held back until more bytes arrive or [`flush`] is called.
///
/// [`flush`]: Utf8StreamDecoder::flush
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning every complete character so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let owned;
        let mut input: &[u8] = if self.pending.is_empty() {
            chunk
        } else {
            self.pending.extend_from_slice(chunk);
            owned = std::mem::take(&mut self.pending);
            &owned
        };

        let mut out = String::with_capacity(input.len());
        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, rest) = input.split_at(e.valid_up_to());
                    // `valid_up_to` marks a valid prefix, so this never falls back.
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[bad..];
                        }
                        None => {
                            // Incomplete sequence at the end: keep it for the next chunk.
                            self.pending = rest.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Finish decoding. A dangling partial sequence becomes U+FFFD.
    pub fn flush(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Whether bytes are being held back waiting for the rest of a character.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_multibyte_character_is_reassembled() {
        let bytes = "你好".as_bytes();
        let mut dec = Utf8StreamDecoder::new();
        assert_eq!(dec.decode(&bytes[..1]), "");
        assert!(dec.has_pending());
        assert_eq!(dec.decode(&bytes[1..4]), "你");
        assert_eq!(dec.decode(&bytes[4..]), "好");
        assert!(!dec.has_pending());
    }

    #[test]
    fn emoji_split_byte_by_byte() {
        let bytes = "a🚀b".as_bytes();
        let mut dec = Utf8StreamDecoder::new();
        let mut out = String::new();
        for b in bytes {
            out.push_str(&dec.decode(std::slice::from_ref(b)));
        }
        assert_eq!(out, "a🚀b");
    }

    #[test]
    fn invalid_bytes_become_replacement_characters() {
        let mut dec = Utf8StreamDecoder::new();
        assert_eq!(dec.decode(b"ok\xFFok"), "ok\u{FFFD}ok");
    }

    #[test]
    fn flush_reports_truncated_sequence() {
        let mut dec = Utf8StreamDecoder::new();
        assert_eq!(dec.decode(&"é".as_bytes()[..1]), "");
        assert_eq!(dec.flush(), "\u{FFFD}");
        assert_eq!(dec.flush(), "");
    }
}
