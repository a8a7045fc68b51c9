//! Per-call bookkeeping shared between the engine and completion handles

use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{ErrorFallback, Occurrences, SubstituteOptions};
use crate::document::Document;
use crate::substitute::error::ResolveError;

use super::apply::apply_values;

pub(crate) type OnComplete =
    Box<dyn FnOnce(Option<Vec<ResolveError>>, Document) + Send + 'static>;

/// Mutable state of one `substitute` call
///
/// `outstanding` counts resolvers that have been (or are about to be)
/// invoked and have not completed. It is fixed before the first resolver
/// runs, so synchronous completions during the initial pass cannot reach
/// zero early.
struct Pending {
    outstanding: usize,
    values: IndexMap<String, String>,
    errors: Vec<ResolveError>,
    options: SubstituteOptions,
    /// `Some` until the completion callback has been claimed
    finish: Option<(Document, OnComplete)>,
}

impl Pending {
    /// Claim the completion once nothing is outstanding
    fn take_if_complete(&mut self) -> Option<Completion> {
        if self.outstanding > 0 {
            return None;
        }

        let (document, on_complete) = self.finish.take()?;
        Some(Completion {
            document,
            on_complete,
            values: std::mem::take(&mut self.values),
            errors: std::mem::take(&mut self.errors),
            occurrences: self.options.occurrences,
        })
    }
}

/// Everything needed to produce the result, detached from the lock
struct Completion {
    document: Document,
    on_complete: OnComplete,
    values: IndexMap<String, String>,
    errors: Vec<ResolveError>,
    occurrences: Occurrences,
}

impl Completion {
    fn run(self) {
        let mut document = self.document;
        apply_values(&mut document, &self.values, self.occurrences);

        tracing::debug!(
            applied = self.values.len(),
            failed = self.errors.len(),
            "substitution complete"
        );

        let errors = if self.errors.is_empty() {
            None
        } else {
            Some(self.errors)
        };
        (self.on_complete)(errors, document);
    }
}

/// Shared handle to a call's [`Pending`] state
#[derive(Clone)]
pub(crate) struct CallState(Arc<Mutex<Pending>>);

impl CallState {
    pub fn new(
        document: Document,
        values: IndexMap<String, String>,
        outstanding: usize,
        options: SubstituteOptions,
        on_complete: OnComplete,
    ) -> Self {
        Self(Arc::new(Mutex::new(Pending {
            outstanding,
            values,
            errors: Vec::new(),
            options,
            finish: Some((document, on_complete)),
        })))
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one resolver's outcome; the last one runs the completion.
    ///
    /// The completion callback runs after the lock is released.
    pub fn settle(&self, placeholder: &str, outcome: Result<String, ResolveError>) {
        let ready = {
            let mut pending = self.lock();

            match outcome {
                Ok(value) => {
                    tracing::trace!(placeholder, "resolver completed");
                    pending.values.insert(placeholder.to_string(), value);
                }
                Err(error) => {
                    tracing::debug!(placeholder, %error, "resolver failed");
                    if pending.options.on_error == ErrorFallback::Empty {
                        pending.values.insert(placeholder.to_string(), String::new());
                    }
                    pending.errors.push(error);
                }
            }

            pending.outstanding = pending.outstanding.saturating_sub(1);
            pending.take_if_complete()
        };

        if let Some(completion) = ready {
            completion.run();
        }
    }

    /// Run the completion if no resolver was ever outstanding
    pub fn finish_if_idle(&self) {
        let ready = self.lock().take_if_complete();
        if let Some(completion) = ready {
            completion.run();
        }
    }
}
