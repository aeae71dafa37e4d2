//! Wire types for the hosted persona provider.
pub mod embed;
pub mod start;

pub use embed::EmbedParams;
pub use start::{StartContext, StartPersonaRequest, StartPersonaResponse};

/// Body returned alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
