//! Resolver failure tests

use super::helpers::{run_sync, start, Captured};
use super::*;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};

#[test]
fn test_single_failure_is_reported() {
    let replacements = Replacements::new().resolver("bar", |done| done.fail("bar is closed"));
    let (errors, result) = run_sync(&Document::from("{bar}"), replacements);

    let errors = errors.expect("failure should be reported");
    assert_eq!(
        errors,
        vec![ResolveError::Failed {
            placeholder: "bar".to_string(),
            message: "bar is closed".to_string(),
        }]
    );
    assert_eq!(result, Document::from(""));
}

#[test]
fn test_failures_and_success_are_aggregated() {
    let replacements = Replacements::new()
        .resolver("foo", |done| done.resolve("crazy"))
        .resolver("bar", |done| done.fail("bar is closed"))
        .resolver("zoo", |done| done.fail("monkey error"));

    let (errors, result) = run_sync(&Document::from("{foo} {bar} {zoo}"), replacements);

    let messages: Vec<_> = errors.unwrap().iter().map(ResolveError::message).collect();
    assert_eq!(messages, vec!["bar is closed", "monkey error"]);
    assert_eq!(result, Document::from("crazy  "));
}

#[test]
fn test_errors_follow_completion_order() {
    let parked: Arc<Mutex<Vec<Done>>> = Arc::new(Mutex::new(Vec::new()));
    let mut replacements = Replacements::new();
    for name in ["first", "second"] {
        let park = Arc::clone(&parked);
        replacements = replacements.resolver(name, move |done| park.lock().unwrap().push(done));
    }

    let slot = start(&Substituter::new(), &Document::from("{first}{second}"), replacements);

    let mut handles = std::mem::take(&mut *parked.lock().unwrap());
    let second = handles.pop().unwrap();
    let first = handles.pop().unwrap();
    second.fail("second failed");
    first.fail("first failed");

    let (errors, _) = slot.lock().unwrap().take().unwrap();
    let placeholders: Vec<_> = errors
        .unwrap()
        .iter()
        .map(|e| e.placeholder().to_string())
        .collect();
    assert_eq!(placeholders, vec!["second", "first"]);
}

#[test]
fn test_dropped_handle_is_abandoned() {
    let replacements = Replacements::new()
        .resolver("foo", drop)
        .resolver("bar", |done| done.resolve("ok"));

    let (errors, result) = run_sync(&Document::from("{foo}|{bar}"), replacements);

    assert_eq!(
        errors,
        Some(vec![ResolveError::Abandoned {
            placeholder: "foo".to_string()
        }])
    );
    assert_eq!(result, Document::from("|ok"));
}

#[test]
fn test_panicking_resolver_still_completes() {
    let replacements = Replacements::new().resolver("foo", |_done| panic!("resolver bug"));
    let document = Document::from("{foo} zoo");
    let slot: Captured = Arc::new(Mutex::new(None));
    let writer = Arc::clone(&slot);

    // The callback runs while unwinding, which poisons the slot
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        Substituter::new().substitute(&document, replacements, move |errors, result| {
            *writer.lock().unwrap_or_else(PoisonError::into_inner) = Some((errors, result));
        })
    }));
    assert!(outcome.is_err());

    let (errors, result) = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .expect("dropped handle should complete the call");
    assert_eq!(
        errors,
        Some(vec![ResolveError::Abandoned {
            placeholder: "foo".to_string()
        }])
    );
    assert_eq!(result, Document::from(" zoo"));
}

#[test]
fn test_panic_in_first_resolver_abandons_the_rest() {
    let replacements = Replacements::new()
        .resolver("foo", |_done| panic!("resolver bug"))
        .resolver("bar", |done| done.resolve("ok"));
    let document = Document::from("{foo}{bar}");
    let slot: Captured = Arc::new(Mutex::new(None));
    let writer = Arc::clone(&slot);

    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        Substituter::new().substitute(&document, replacements, move |errors, result| {
            *writer.lock().unwrap_or_else(PoisonError::into_inner) = Some((errors, result));
        })
    }));
    assert!(outcome.is_err());

    let (errors, result) = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .expect("uninvoked resolvers should not stall the call");
    assert_eq!(
        errors,
        Some(vec![
            ResolveError::Abandoned {
                placeholder: "foo".to_string()
            },
            ResolveError::Abandoned {
                placeholder: "bar".to_string()
            },
        ])
    );
    assert_eq!(result, Document::from(""));
}

#[test]
fn test_complete_prefers_error_over_value() {
    let replacements = Replacements::new()
        .resolver("foo", |done| done.complete(Err::<Option<String>, _>("nope")));
    let (errors, _) = run_sync(&Document::from("{foo}"), replacements);
    assert_eq!(errors.unwrap()[0].message(), "nope");
}

#[test]
fn test_no_runtime_for_future_resolver() {
    let replacements =
        Replacements::new().future("foo", async { Ok::<_, String>(Some("never".to_string())) });
    let (errors, result) = run_sync(&Document::from("{foo} zoo"), replacements);
    assert_eq!(
        errors,
        Some(vec![ResolveError::NoRuntime {
            placeholder: "foo".to_string()
        }])
    );
    assert_eq!(result, Document::from(" zoo"));
}

#[test]
fn test_error_display_codes() {
    let failed = ResolveError::Failed {
        placeholder: "bar".to_string(),
        message: "bar is closed".to_string(),
    };
    assert_eq!(failed.to_string(), "RESOLVER_FAILED: 'bar': bar is closed");

    let abandoned = ResolveError::Abandoned {
        placeholder: "foo".to_string(),
    };
    assert!(abandoned.to_string().starts_with("RESOLVER_ABANDONED"));
    assert_eq!(abandoned.placeholder(), "foo");
}
