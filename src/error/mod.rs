//! Error Handling Module
//!
//! This module provides error handling for the client, including:
//! - Core error type (`BlogError`)
//! - Helpers for pulling a human-readable message out of error bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use inkpost::error::BlogError;
//!
//! let error = BlogError::http_status(500, "server down");
//! assert_eq!(error.message(), "server down");
//! assert_eq!(error.status(), Some(500));
//! ```

pub mod helpers;
pub mod types;

pub use helpers::*;
pub use types::*;
