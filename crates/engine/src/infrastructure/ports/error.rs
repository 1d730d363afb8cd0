//! Error types for infrastructure ports.

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The id did not resolve on the content service. Treated as a
    /// content-authoring defect, never retried automatically.
    #[error("Not found")]
    NotFound,

    /// Network or service failure. Recoverable by retrying the same
    /// operation; the engine leaves its state unchanged.
    #[error("Service error: {0}")]
    Service(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}
