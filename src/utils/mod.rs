//! Utility modules for inkpost
//!
//! Cancellation handles and incremental UTF-8 decoding shared by the stream
//! decoder and the client.

pub mod cancel;
pub mod utf8_decoder;

pub use cancel::CancelHandle;
pub use utf8_decoder::Utf8StreamDecoder;
