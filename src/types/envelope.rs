//! Response envelope shared by every non-streaming endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{BlogError, Result};

/// `{code, message, data}` wrapper. `code != 0` signals an application error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }

    /// Unwrap `data` into `T`, or turn a non-zero code into [`BlogError::Api`].
    ///
    /// A missing `data` field deserializes from `null`, so `T = ()` or
    /// `Option<_>` work for endpoints that return nothing.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_ok() {
            return Err(BlogError::Api {
                code: self.code,
                message: self.message,
            });
        }
        serde_json::from_value(self.data)
            .map_err(|e| BlogError::Parse(format!("Failed to decode response data: {e}")))
    }
}
