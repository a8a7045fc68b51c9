//! Fixture documents for substitution tests

use serde_json::json;
use subst_core::Document;

/// Object subject with string leaves, a plain leaf, and a nested sequence
///
/// Uses `{foo}` and `{bar}`; `b` mentions `foo` without braces.
pub fn complex_subject() -> Document {
    Document::from(json!({
        "a": "{foo} zoo {bar}",
        "b": "cool foo",
        "c": "not so {foo} anymore",
        "d": ["earth", "{foo} wind", "fire {bar}"]
    }))
}

/// Message-template style document mixing opaque values and placeholders
pub fn config_subject() -> Document {
    Document::from(json!({
        "service": "{name}",
        "port": 8080,
        "enabled": true,
        "owner": null,
        "endpoints": [
            {"url": "https://{host}/api", "retries": 3},
            {"url": "https://{host}/health", "retries": 0}
        ],
        "greeting": "Hello {user}, welcome to {name}"
    }))
}
