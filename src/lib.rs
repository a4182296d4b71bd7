//! # Inkpost - Blog API Client with Streaming AI Writing
//!
//! Typed client for the inkpost blog backend. Besides the usual article,
//! taxonomy, comment and account endpoints it drives the AI writing
//! endpoints, which answer with a `text/event-stream` body of JSON deltas.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Stream Decoder**: UTF-8 safe, chunking-invariant decoding of `data:` records into text deltas.
//! - **Cooperative Cancellation**: a [`CancelHandle`] stops a session at the next read or line.
//! - **Envelope Handling**: `{code, message, data}` responses decode straight into typed models.
//! - **Token Lifecycle**: bearer token attached on every call and cleared on `401`.
//! - **Settings Cache**: site settings cached with a five minute TTL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inkpost::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BlogClient::new(ClientConfig::new("http://localhost:8080/api"))?;
//!     client.login("admin", "secret").await?;
//!
//!     let mut sink = CollectSink::new();
//!     let request = GenerateArticleRequest::new("Ownership in Rust");
//!     let outcome = client
//!         .generate_article(&request, &mut sink, &CancelHandle::new())
//!         .await;
//!
//!     if outcome.is_completed() {
//!         println!("{}", sink.text());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod settings_cache;
pub mod streaming;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use client::BlogClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use confirm::{ConfirmKind, ConfirmOptions, ConfirmReply, Confirmer};
pub use error::{BlogError, Result};
pub use settings_cache::SettingsCache;
pub use streaming::{
    CollectSink, DecoderConfig, StreamDecoder, StreamEvent, StreamOutcome, StreamResponse,
    StreamSink,
};
pub use utils::CancelHandle;

/// Commonly used items.
pub mod prelude {
    pub use crate::client::BlogClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{BlogError, Result};
    pub use crate::streaming::{
        CollectSink, DecoderConfig, StreamDecoder, StreamEvent, StreamOutcome, StreamSink,
    };
    pub use crate::types::*;
    pub use crate::utils::CancelHandle;
}
