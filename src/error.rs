use thiserror::Error;

/// Main error type for the draft engine
#[derive(Error, Debug)]
pub enum DraftError {
    /// Malformed draft or finals text
    #[error("invalid draft format at line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// Roster failed validation
    #[error("invalid roster: {0}")]
    Roster(String),

    /// No contestant matched above the acceptance threshold
    #[error("no match found for '{name}' (best score: {best_score:.2})")]
    NoMatch { name: String, best_score: f64 },

    /// Draft references a player absent from completed final results
    #[error("player not found in final results: {0}")]
    PlayerNotFound(String),

    /// Publisher rejected the message
    #[error("publish failed: {0}")]
    Publish(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DraftError>;
