//! Error types for the prompt-set library.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use thiserror::Error;

/// Main error type for prompt-set operations.
///
/// Mutator and query errors are returned synchronously from the method that
/// caused them; the only asynchronous failure path is the external prompt
/// engine, whose failures surface as [`PromptSetError::Engine`] and propagate
/// unchanged through `Unit::run` and `Collection::start`.
#[derive(Error, Debug)]
pub enum PromptSetError {
    /// A unit or collection was configured with invalid data
    /// (missing/empty name, malformed declarative config).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An identifier did not resolve to a unit in the collection.
    /// Raised by search, removal, and dependency lookup; an unmet (but
    /// existing) dependency is a user-recoverable block, not this error.
    #[error("no matching unit found: {0}")]
    NotFound(String),

    /// `start()` was called on a collection with zero units.
    #[error("cannot start an empty collection")]
    EmptyCollection,

    /// A finish-mode selector string did not name a known mode.
    #[error("invalid finish mode: {0}")]
    Policy(String),

    /// The external prompt engine failed while presenting a question.
    #[error("prompt engine failure: {0}")]
    Engine(String),
}

/// Result type alias for prompt-set operations.
pub type Result<T> = std::result::Result<T, PromptSetError>;
