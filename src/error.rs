//! Host-facing error types

use thiserror::Error;

/// Errors surfaced to the embedding application
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsError {
    /// An error object escaped the outermost script boundary. `name` and
    /// `message` are the values the error was created with.
    #[error("Uncaught {name}: {message}")]
    Uncaught { name: String, message: String },

    /// A non-error value was thrown and not caught
    #[error("Uncaught {0}")]
    UncaughtValue(String),
}

impl JsError {
    pub fn name(&self) -> Option<&str> {
        match self {
            JsError::Uncaught { name, .. } => Some(name),
            JsError::UncaughtValue(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            JsError::Uncaught { message, .. } => message,
            JsError::UncaughtValue(rendered) => rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_console_report() {
        let err = JsError::Uncaught {
            name: "RangeError".to_string(),
            message: "toFixed() argument must be between 0 and 20".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Uncaught RangeError: toFixed() argument must be between 0 and 20"
        );
        assert_eq!(err.name(), Some("RangeError"));
        assert_eq!(JsError::UncaughtValue("42".to_string()).to_string(), "Uncaught 42");
    }
}
