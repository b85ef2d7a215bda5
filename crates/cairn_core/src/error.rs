use thiserror::Error;

/// Failure of the asset index listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The credential was rejected (HTTP 403).
    #[error("Credential expired or invalid")]
    AuthExpired,

    #[error("Asset index unavailable: {message}")]
    ServiceUnavailable { message: String },
}

impl IndexError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }
}

/// Failure to obtain a single manifest. Never escalates past the item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Manifest {content_id} unavailable: {reason}")]
pub struct ManifestError {
    pub content_id: String,
    pub reason: String,
}

impl ManifestError {
    pub fn new(content_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            reason: reason.into(),
        }
    }
}
