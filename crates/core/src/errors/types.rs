//! Core error type definitions

/// Result type alias for amalfi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Library error type.
///
/// Failures raised by user steps are never converted into this type: a
/// pipeline hands them back exactly as the step produced them. `Error` only
/// covers conditions the library itself detects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unseeded reduction was asked to fold an empty input
    EmptyReduce { operation: String },

    /// A panic captured while evaluating a guarded call
    Panicked { message: String },

    /// Invalid settings or logging setup
    Configuration { message: String },

    /// JSON decoding errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Async runtime misuse or construction failure
    Runtime { message: String },
}
