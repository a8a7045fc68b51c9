//! Substitution engine implementation

mod apply;
mod done;
mod replacement;
mod state;
pub(crate) mod tokenize;

use indexmap::IndexMap;
use tokio::sync::oneshot;

use crate::config::SubstituteOptions;
use crate::document::Document;
use crate::error::{Result, SubstError};
use crate::substitute::error::ResolveError;

pub use done::Done;
pub use replacement::{Replacement, Replacements, Resolver};
use state::CallState;

/// Final output of a substitution
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    /// Resolver failures in completion order, `None` if there were none
    pub errors: Option<Vec<ResolveError>>,
    /// Substituted copy of the input document
    pub document: Document,
}

impl Substitution {
    /// `Ok(document)` when every resolver succeeded
    pub fn into_result(self) -> std::result::Result<Document, Vec<ResolveError>> {
        match self.errors {
            Some(errors) => Err(errors),
            None => Ok(self.document),
        }
    }
}

/// Substitution engine for documents with `{name}` placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct Substituter {
    options: SubstituteOptions,
}

impl Substituter {
    /// Create an engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given options
    pub fn with_options(options: SubstituteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SubstituteOptions {
        &self.options
    }

    /// Substitute `replacements` into a copy of `document`.
    ///
    /// `on_complete` is called exactly once with the resolver errors (in
    /// completion order, `None` if none failed) and the substituted copy.
    /// With no outstanding resolvers it is called before this function
    /// returns; otherwise it runs inside whichever completion handle
    /// finishes last.
    ///
    /// Literals are always applied. A resolver is invoked only if `{name}`
    /// occurs in the document; otherwise it is dropped uninvoked.
    pub fn substitute<F>(&self, document: &Document, replacements: Replacements, on_complete: F)
    where
        F: FnOnce(Option<Vec<ResolveError>>, Document) + Send + 'static,
    {
        let copy = document.clone();
        let mut values = IndexMap::new();
        let mut invoked = Vec::new();

        for (name, replacement) in replacements {
            match replacement {
                Replacement::Literal(value) => {
                    values.insert(name, value);
                }
                Replacement::Resolver(resolver) => {
                    if copy.contains_placeholder(&name) {
                        invoked.push((name, resolver));
                    } else {
                        tracing::debug!(placeholder = %name, "placeholder absent, resolver skipped");
                    }
                }
            }
        }

        tracing::trace!(
            literals = values.len(),
            resolvers = invoked.len(),
            "starting substitution"
        );

        let state = CallState::new(
            copy,
            values,
            invoked.len(),
            self.options,
            Box::new(on_complete),
        );

        if invoked.is_empty() {
            state.finish_if_idle();
            return;
        }

        // Every handle exists before the first resolver runs, so a panic
        // mid-loop drops the rest as abandoned instead of leaking their count
        let handles: Vec<(Resolver, Done)> = invoked
            .into_iter()
            .map(|(name, resolver)| (resolver, Done::new(state.clone(), name)))
            .collect();

        for (resolver, done) in handles {
            tracing::trace!(placeholder = %done.placeholder(), "invoking resolver");
            resolver.invoke(done);
        }
    }

    /// Await the result of [`Substituter::substitute`].
    ///
    /// Resolves immediately when no resolver is outstanding.
    pub async fn substitute_async(
        &self,
        document: &Document,
        replacements: Replacements,
    ) -> Result<Substitution> {
        let (tx, rx) = oneshot::channel();

        self.substitute(document, replacements, move |errors, document| {
            let _ = tx.send(Substitution { errors, document });
        });

        rx.await.map_err(|_| SubstError::CompletionLost)
    }
}

/// Convenience function to substitute with default options
pub fn substitute<F>(document: &Document, replacements: Replacements, on_complete: F)
where
    F: FnOnce(Option<Vec<ResolveError>>, Document) + Send + 'static,
{
    Substituter::new().substitute(document, replacements, on_complete)
}

/// Convenience function to await a substitution with default options
pub async fn substitute_async(
    document: &Document,
    replacements: Replacements,
) -> Result<Substitution> {
    Substituter::new()
        .substitute_async(document, replacements)
        .await
}

#[cfg(test)]
mod tests;
