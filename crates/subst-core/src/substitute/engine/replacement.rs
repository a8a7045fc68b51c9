//! Replacement set: literal values and resolvers keyed by placeholder name

use indexmap::IndexMap;
use std::fmt;
use std::future::Future;
use tokio::runtime::Handle;

use super::done::Done;

type ResolverFn = Box<dyn FnOnce(Done) + Send + 'static>;

/// Single-use unit of work producing the value for one placeholder
///
/// The resolver receives a [`Done`] handle and completes it exactly once,
/// now or later, on any thread.
pub struct Resolver(ResolverFn);

impl Resolver {
    /// Wrap a callback-style resolver
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Done) + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Wrap a future. When invoked, the future is spawned on the current
    /// Tokio runtime and its output completes the handle.
    ///
    /// `Ok(None)` resolves to the empty string. Invoked outside a runtime,
    /// the placeholder fails with [`ResolveError::NoRuntime`].
    ///
    /// [`ResolveError::NoRuntime`]: crate::substitute::ResolveError::NoRuntime
    pub fn from_future<Fut, E>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<Option<String>, E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        Self::new(move |done| match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    done.complete(future.await);
                });
            }
            Err(_) => done.no_runtime(),
        })
    }

    pub(crate) fn invoke(self, done: Done) {
        (self.0)(done)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}

/// Value registered for a placeholder
#[derive(Debug)]
pub enum Replacement {
    /// Applied immediately, whether or not the token occurs
    Literal(String),
    /// Invoked only if the token occurs in the document
    Resolver(Resolver),
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::Literal(value.to_string())
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::Literal(value)
    }
}

impl From<Resolver> for Replacement {
    fn from(resolver: Resolver) -> Self {
        Replacement::Resolver(resolver)
    }
}

/// Insertion-ordered placeholder name → [`Replacement`] mapping
///
/// # Example
///
/// ```rust
/// use subst_core::Replacements;
///
/// let replacements = Replacements::new()
///     .literal("foo", "crazy")
///     .resolver("bar", |done| done.resolve("life"));
/// assert_eq!(replacements.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    entries: IndexMap<String, Replacement>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a literal value
    pub fn literal(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Replacement::Literal(value.into()));
        self
    }

    /// Register a callback-style resolver
    pub fn resolver<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(Done) + Send + 'static,
    {
        self.insert(name, Resolver::new(f));
        self
    }

    /// Register a future-backed resolver (see [`Resolver::from_future`])
    pub fn future<Fut, E>(mut self, name: impl Into<String>, future: Fut) -> Self
    where
        Fut: Future<Output = Result<Option<String>, E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        self.insert(name, Resolver::from_future(future));
        self
    }

    /// Insert or replace the entry for `name`, returning the previous one
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        replacement: impl Into<Replacement>,
    ) -> Option<Replacement> {
        self.entries.insert(name.into(), replacement.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl IntoIterator for Replacements {
    type Item = (String, Replacement);
    type IntoIter = indexmap::map::IntoIter<String, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<Replacement>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        replacements.extend(iter);
        replacements
    }
}

impl<K, V> Extend<(K, V)> for Replacements
where
    K: Into<String>,
    V: Into<Replacement>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, replacement) in iter {
            self.insert(name, replacement);
        }
    }
}
