//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyReduce { operation } => {
                write!(f, "{operation} of an empty sequence with no initial value")
            }
            Error::Panicked { message } => write!(f, "call panicked: {message}"),
            Error::Configuration { message } => write!(f, "configuration error: {message}"),
            Error::Json { message, .. } => write!(f, "JSON error: {message}"),
            Error::Runtime { message } => write!(f, "runtime error: {message}"),
        }
    }
}
