//! Error types for the emitter.

use thiserror::Error;

/// Error returned by a handler.
///
/// `Emitter::emit` hands this back to its caller exactly as the handler
/// produced it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a single handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Result type for emitter operations that can fail.
pub type EmitterResult<T> = Result<T, EmitterError>;

/// Errors raised by the emitter itself.
#[derive(Debug, Error)]
pub enum EmitterError {
    /// A value that is not a handler was offered for registration.
    #[error("callback is wrong type: expected Handler, got {received}")]
    InvalidHandlerType { received: &'static str },

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EmitterError {
    fn from(err: serde_json::Error) -> Self {
        EmitterError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_handler_type_message_names_received_type() {
        let err = EmitterError::InvalidHandlerType { received: "i32" };
        assert_eq!(
            err.to_string(),
            "callback is wrong type: expected Handler, got i32"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: EmitterError = json_err.into();
        assert!(matches!(err, EmitterError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
