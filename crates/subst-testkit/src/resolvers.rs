//! Resolver stubs and a completion recorder
//!
//! All shared state recovers from poisoned mutexes so a failing assertion
//! inside one callback does not cascade into unrelated checks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use subst_core::{Document, Done, ResolveError, Resolver};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Counts how many of its resolvers were invoked
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of invocations so far
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Resolver that counts, then resolves synchronously with `value`
    pub fn resolving(&self, value: impl Into<String>) -> Resolver {
        let calls = Arc::clone(&self.calls);
        let value = value.into();
        Resolver::new(move |done| {
            calls.fetch_add(1, Ordering::SeqCst);
            done.resolve(value);
        })
    }

    /// Resolver that counts, then fails synchronously with `message`
    pub fn failing(&self, message: impl Into<String>) -> Resolver {
        let calls = Arc::clone(&self.calls);
        let message = message.into();
        Resolver::new(move |done| {
            calls.fetch_add(1, Ordering::SeqCst);
            done.fail(message);
        })
    }
}

/// Parks completion handles so a test decides when and in which order
/// resolvers finish
#[derive(Debug, Clone, Default)]
pub struct Parked {
    handles: Arc<Mutex<Vec<Done>>>,
}

impl Parked {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that parks its handle
    pub fn resolver(&self) -> Resolver {
        let handles = Arc::clone(&self.handles);
        Resolver::new(move |done| lock(&handles).push(done))
    }

    /// Number of parked handles
    pub fn len(&self) -> usize {
        lock(&self.handles).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.handles).is_empty()
    }

    /// Placeholder names of parked handles, in invocation order
    pub fn names(&self) -> Vec<String> {
        lock(&self.handles)
            .iter()
            .map(|done| done.placeholder().to_string())
            .collect()
    }

    /// Remove the handle for `name`
    pub fn take(&self, name: &str) -> Option<Done> {
        let mut handles = lock(&self.handles);
        let index = handles.iter().position(|done| done.placeholder() == name)?;
        Some(handles.remove(index))
    }

    /// Resolve the handle for `name`; false if none is parked.
    ///
    /// The lock is released before completing, since the last completion
    /// runs the substitution callback.
    pub fn resolve(&self, name: &str, value: impl Into<String>) -> bool {
        match self.take(name) {
            Some(done) => {
                done.resolve(value);
                true
            }
            None => false,
        }
    }

    /// Fail the handle for `name`; false if none is parked
    pub fn fail(&self, name: &str, message: impl Into<String>) -> bool {
        match self.take(name) {
            Some(done) => {
                done.fail(message.into());
                true
            }
            None => false,
        }
    }
}

type Outcome = (Option<Vec<ResolveError>>, Document);

/// Records what the completion callback received and how often it fired
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    outcome: Arc<Mutex<Option<Outcome>>>,
    calls: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion callback to hand to `substitute`
    pub fn callback(&self) -> impl FnOnce(Option<Vec<ResolveError>>, Document) + Send + 'static {
        let outcome = Arc::clone(&self.outcome);
        let calls = Arc::clone(&self.calls);
        move |errors, document| {
            calls.fetch_add(1, Ordering::SeqCst);
            *lock(&outcome) = Some((errors, document));
        }
    }

    /// How many times the callback fired
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self) -> bool {
        self.calls() > 0
    }

    /// Take the recorded outcome
    pub fn take(&self) -> Option<Outcome> {
        lock(&self.outcome).take()
    }
}
