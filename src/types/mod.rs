//! API data types
//!
//! Models returned by the blog API and the request bodies it accepts.

pub mod ai;
pub mod article;
pub mod auth;
pub mod comment;
pub mod envelope;
pub mod settings;
pub mod taxonomy;

pub use ai::*;
pub use article::*;
pub use auth::*;
pub use comment::*;
pub use envelope::*;
pub use settings::*;
pub use taxonomy::*;
