//! Streaming Module
//!
//! Client side of the AI writing endpoints. This module consolidates:
//! - Frame parsing for `data:` lines
//! - Per-call session buffering with UTF-8 safe decoding
//! - Sinks that receive deltas and terminal outcomes
//! - The transport abstraction over streamed response bodies
//! - The decoder driving all of the above

mod config;
mod decoder;
mod frame;
mod response;
mod session;
mod sink;

// Re-exports
pub use config::*;
pub use decoder::*;
pub use frame::*;
pub use response::*;
pub use session::*;
pub use sink::*;
