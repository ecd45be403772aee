use thiserror::Error;

/// Failures surfaced by the domain services.
///
/// Every failure is a value the caller can match on; nothing is swallowed
/// into logs. Storage failures carry their full source chain.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// The recipe does not exist or belongs to another user
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// A mutation was attempted without an authenticated session
    #[error("No active session")]
    NoSession,

    /// The persistent store failed and the operation was dropped
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
