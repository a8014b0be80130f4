use thiserror::Error;

/// How much of a malformed model reply is echoed back in error messages
const RAW_PREVIEW_CHARS: usize = 200;

/// Custom error types for the Flipper system
#[derive(Debug, Error)]
pub enum FlipperError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Failed to parse model response: {message} (raw: {})", preview(.raw))]
    Parse { message: String, raw: String },

    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type specific to Flipper operations
pub type FlipperResult<T> = Result<T, FlipperError>;

impl FlipperError {
    /// Persistence failures are logged, never shown to the user
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, FlipperError::Persistence(_))
    }

    /// Short label used for the error banner title
    pub fn kind(&self) -> &'static str {
        match self {
            FlipperError::Validation(_) => "Validation Error",
            FlipperError::Configuration(_) => "Configuration Error",
            FlipperError::Service(_) => "API Error",
            FlipperError::Parse { .. } => "Parse Error",
            FlipperError::Persistence(_) => "Persistence Error",
        }
    }
}

fn preview(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(RAW_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
