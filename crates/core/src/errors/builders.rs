//! Builder methods for creating errors with context

use super::types::Error;
use std::any::Any;
use std::fmt;

impl Error {
    /// Create an empty-reduction error for the named operation
    #[must_use]
    pub fn empty_reduce(operation: impl Into<String>) -> Self {
        Error::EmptyReduce {
            operation: operation.into(),
        }
    }

    /// Create a panic error with the given message
    #[must_use]
    pub fn panicked(message: impl Into<String>) -> Self {
        Error::Panicked {
            message: message.into(),
        }
    }

    /// Create a panic error from a payload returned by `catch_unwind`
    #[must_use]
    pub fn from_panic_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Error::Panicked { message }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a runtime error
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Error::Runtime {
            message: message.into(),
        }
    }

    /// Prefix the error's message with `context`, keeping its kind
    #[must_use]
    pub fn in_context(self, context: impl fmt::Display) -> Self {
        match self {
            Error::EmptyReduce { operation } => Error::EmptyReduce {
                operation: format!("{context}: {operation}"),
            },
            Error::Panicked { message } => Error::Panicked {
                message: format!("{context}: {message}"),
            },
            Error::Configuration { message } => Error::Configuration {
                message: format!("{context}: {message}"),
            },
            Error::Json { message, source } => Error::Json {
                message: format!("{context}: {message}"),
                source,
            },
            Error::Runtime { message } => Error::Runtime {
                message: format!("{context}: {message}"),
            },
        }
    }
}
