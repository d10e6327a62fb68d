//! Error types for the dodge engine.
//!
//! The frame loop itself never fails; errors only come from building a
//! configuration or parsing data handed over by the page.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DodgeError {
    #[error("invalid config: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("pose results parse error: {0}")]
    PoseParse(#[source] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl DodgeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, DodgeError>;
