//! Tailfin error types

/// Tailfin error types
#[derive(Debug, thiserror::Error)]
pub enum TailfinError {
    // Client input errors
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    // Outbound budget errors
    #[error("upstream call budget exhausted")]
    RateLimited,

    // Upstream/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TailfinError {
    /// Whether this error originated in the external provider (transport
    /// or API failure) rather than in the caller's input or our config.
    pub fn is_upstream(&self) -> bool {
        matches!(self, TailfinError::Http(_) | TailfinError::Upstream { .. })
    }
}

/// Result type alias for Tailfin operations
pub type Result<T> = std::result::Result<T, TailfinError>;
