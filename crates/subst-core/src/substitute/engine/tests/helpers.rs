//! Shared test helpers for engine tests

use std::sync::{Arc, Mutex};

use crate::document::Document;
use crate::substitute::engine::{Replacements, Substituter};
use crate::substitute::error::ResolveError;
use serde_json::json;

pub(super) type Captured = Arc<Mutex<Option<(Option<Vec<ResolveError>>, Document)>>>;

/// Start a substitution and return the slot the callback writes into
pub(super) fn start(
    engine: &Substituter,
    document: &Document,
    replacements: Replacements,
) -> Captured {
    let slot: Captured = Arc::new(Mutex::new(None));
    let writer = Arc::clone(&slot);
    engine.substitute(document, replacements, move |errors, result| {
        let mut guard = writer.lock().unwrap();
        assert!(guard.is_none(), "completion callback fired twice");
        *guard = Some((errors, result));
    });
    slot
}

/// Run a substitution that must complete before `substitute` returns
pub(super) fn run_sync(
    document: &Document,
    replacements: Replacements,
) -> (Option<Vec<ResolveError>>, Document) {
    run_sync_with(&Substituter::new(), document, replacements)
}

pub(super) fn run_sync_with(
    engine: &Substituter,
    document: &Document,
    replacements: Replacements,
) -> (Option<Vec<ResolveError>>, Document) {
    let slot = start(engine, document, replacements);
    let taken = slot.lock().unwrap().take();
    taken.expect("substitution should complete synchronously")
}

/// Object subject with a nested sequence, mirroring a typical config document
pub(super) fn complex_subject() -> Document {
    Document::from(json!({
        "a": "{foo} zoo {bar}",
        "b": "cool foo",
        "c": "not so {foo} anymore",
        "d": ["earth", "{foo} wind", "fire {bar}"]
    }))
}
