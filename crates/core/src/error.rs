/// Failures scoped to a single persona connection attempt or microphone check.
///
/// Both kinds are recoverable by re-running the failed operation; nothing here
/// is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonaError {
    #[error("{0}")]
    ConnectionFailure(String),
    #[error("{0}")]
    PermissionDenied(String),
}

impl PersonaError {
    /// Short heading for the error, suitable for a status line.
    pub fn title(&self) -> &'static str {
        match self {
            PersonaError::ConnectionFailure(_) => "Connection Error",
            PersonaError::PermissionDenied(_) => "Microphone Permission Denied",
        }
    }
}

/// Errors raised while validating or loading a question catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate domain id: {0}")]
    DuplicateDomain(String),
    #[error("Duplicate question id '{id}' in domain '{domain}'")]
    DuplicateQuestion { domain: String, id: String },
    #[error("Question in domain '{domain}' has an empty '{field}' field")]
    EmptyField { domain: String, field: &'static str },
}
