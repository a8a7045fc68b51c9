//! Resolver error types

use thiserror::Error;

/// Failure reported for one placeholder.
///
/// These are collected per call and handed to the completion callback in
/// the order the resolvers finished. They never abort a substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The resolver reported an error through its completion handle
    #[error("RESOLVER_FAILED: '{placeholder}': {message}")]
    Failed {
        /// Placeholder the resolver was registered for
        placeholder: String,
        /// Error text supplied by the resolver
        message: String,
    },

    /// The completion handle was dropped without being completed
    #[error("RESOLVER_ABANDONED: resolver for '{placeholder}' dropped its completion handle")]
    Abandoned { placeholder: String },

    /// A future-backed resolver was invoked outside a Tokio runtime
    #[error("RESOLVER_NO_RUNTIME: resolver for '{placeholder}' requires a Tokio runtime")]
    NoRuntime { placeholder: String },
}

impl ResolveError {
    /// Placeholder name this error belongs to
    pub fn placeholder(&self) -> &str {
        match self {
            ResolveError::Failed { placeholder, .. }
            | ResolveError::Abandoned { placeholder }
            | ResolveError::NoRuntime { placeholder } => placeholder,
        }
    }

    /// Resolver-supplied message, or the display text for engine-side failures
    pub fn message(&self) -> String {
        match self {
            ResolveError::Failed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
