use thiserror::Error;

/// Boundary errors.
///
/// The physics stages themselves never fail: degenerate input falls back to a
/// best-effort result. Only parsing and validation at the API edge can error.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown surface type: {0}")]
    UnknownSurface(String),

    #[error("Invalid properties for surface {surface}: {reason}")]
    InvalidSurfaceProperties { surface: String, reason: String },

    #[error("Unknown club: {0}")]
    UnknownClub(String),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Whether the caller can retry with corrected input (as opposed to a
    /// malformed payload).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, SimError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::UnknownSurface("LAVA".to_string());
        assert_eq!(err.to_string(), "Unknown surface type: LAVA");

        let err = SimError::InvalidSurfaceProperties {
            surface: "GREEN".to_string(),
            reason: "bounce out of range".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid properties for surface GREEN: bounce out of range");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: SimError = parse.unwrap_err().into();
        assert!(matches!(err, SimError::Json(_)));
        assert!(!err.is_input_error());
    }
}
