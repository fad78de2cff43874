//! Dispatcher error types.
//!
//! [`HookError`] covers everything reported synchronously by the dispatcher
//! API. [`HandlerError`] is what a handler produces when it fails; it is the
//! only error a running chain can settle with.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors reported by the dispatcher API.
#[derive(Debug, Clone, Error)]
pub enum HookError {
    /// The action set given at construction was empty or malformed.
    #[error("Invalid dispatcher configuration: {0}")]
    Configuration(String),

    /// The action name is not part of the dispatcher's fixed set.
    #[error("Unknown action: `{0}`")]
    UnknownAction(String),

    /// A handler could not be resolved for registration.
    #[error("Invalid handler for `{action}`: {reason}")]
    InvalidHandler {
        /// Action the handler was meant for.
        action: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Trigger arguments were not an ordered sequence.
    #[error("Invalid trigger arguments: {0}")]
    InvalidArguments(String),

    /// A handler failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Result type for dispatcher operations.
pub type Result<T> = std::result::Result<T, HookError>;

/// Outcome of a single handler, and of a whole chain.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Failure signalled by a handler.
///
/// Cheap to clone so the same failure can be handed to a final callback and
/// returned from the trigger future. Displays as its message only.
#[derive(Clone)]
pub struct HandlerError {
    message: String,
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl HandlerError {
    /// Failure with a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it reachable through `source()`.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: error.to_string(),
            source: Some(Arc::new(error)),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn completion_dropped() -> Self {
        Self::msg("completion dropped without a signal")
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerError")
            .field("message", &self.message)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unknown_action_display() {
        let err = HookError::UnknownAction("someAction".to_string());
        assert_eq!(err.to_string(), "Unknown action: `someAction`");
    }

    #[test]
    fn configuration_display() {
        let err = HookError::Configuration("no actions given".to_string());
        assert!(err.to_string().contains("no actions given"));
    }

    #[test]
    fn invalid_handler_display() {
        let err = HookError::InvalidHandler {
            action: "afterUpdate".to_string(),
            reason: "no handler named `audit`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid handler for `afterUpdate`: no handler named `audit`"
        );
    }

    #[test]
    fn handler_variant_is_transparent() {
        let err: HookError = HandlerError::msg("Some error").into();
        assert_eq!(err.to_string(), "Some error");
    }

    #[test]
    fn handler_error_displays_message_only() {
        let err = HandlerError::from("Some error");
        assert_eq!(err.to_string(), "Some error");
        assert_eq!(err.message(), "Some error");
        assert!(err.source().is_none());
    }

    #[test]
    fn wrapped_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = HandlerError::from(io);
        assert_eq!(err.message(), "gone");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "gone");
    }

    #[test]
    fn clones_share_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = HandlerError::from(json_err);
        let copy = err.clone();
        assert_eq!(err.message(), copy.message());
        assert!(copy.source().is_some());
    }

    #[test]
    fn debug_hides_source_internals() {
        let err = HandlerError::msg("boom");
        let debug = format!("{err:?}");
        assert!(debug.contains("HandlerError"));
        assert!(debug.contains("has_source: false"));
    }
}
