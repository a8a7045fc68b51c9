//! Completion handle handed to resolvers

use std::fmt;

use crate::substitute::error::ResolveError;

use super::state::CallState;

/// Single-use completion handle for one placeholder
///
/// Every method consumes the handle, so a resolver cannot complete twice.
/// Dropping the handle without completing it records
/// [`ResolveError::Abandoned`] and consumes the placeholder, so a resolver
/// that panics or forgets its handle does not stall the call. A resolver
/// that keeps the handle alive and never completes it does stall the call:
/// there is no timeout.
pub struct Done {
    state: CallState,
    placeholder: String,
    settled: bool,
}

impl Done {
    pub(crate) fn new(state: CallState, placeholder: String) -> Self {
        Self {
            state,
            placeholder,
            settled: false,
        }
    }

    /// Placeholder name this handle resolves
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Complete with a replacement value
    pub fn resolve(self, value: impl Into<String>) {
        self.settle(Ok(value.into()));
    }

    /// Complete with an error. The error text is recorded; the placeholder
    /// falls back according to the configured [`ErrorFallback`].
    ///
    /// [`ErrorFallback`]: crate::config::ErrorFallback
    pub fn fail(self, error: impl fmt::Display) {
        let error = ResolveError::Failed {
            placeholder: self.placeholder.clone(),
            message: error.to_string(),
        };
        self.settle(Err(error));
    }

    /// Complete with an `(error, value)` pair: an error wins, a missing value
    /// becomes the empty string.
    pub fn complete<E: fmt::Display>(self, result: Result<Option<String>, E>) {
        match result {
            Ok(value) => self.resolve(value.unwrap_or_default()),
            Err(error) => self.fail(error),
        }
    }

    pub(crate) fn no_runtime(self) {
        let error = ResolveError::NoRuntime {
            placeholder: self.placeholder.clone(),
        };
        self.settle(Err(error));
    }

    fn settle(mut self, outcome: Result<String, ResolveError>) {
        self.settled = true;
        self.state.settle(&self.placeholder, outcome);
    }
}

impl Drop for Done {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.settled = true;
        tracing::debug!(placeholder = %self.placeholder, "completion handle dropped unresolved");
        let error = ResolveError::Abandoned {
            placeholder: self.placeholder.clone(),
        };
        self.state.settle(&self.placeholder, Err(error));
    }
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("placeholder", &self.placeholder)
            .field("settled", &self.settled)
            .finish_non_exhaustive()
    }
}
