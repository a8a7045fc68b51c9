//! Substitute module - recursive `{name}` placeholder substitution
//!
//! Replaces `{name}` tokens anywhere in a nested [`Document`] with literal
//! values or with values produced by resolvers that complete on their own
//! schedule.
//!
//! ## Behaviour
//!
//! - **Copy, never mutate**: the caller's document is deep-copied
//! - **Literals always apply**: a literal for an absent token is a no-op
//! - **Resolvers are occurrence-gated**: a resolver whose `{name}` does not
//!   occur anywhere is never invoked
//! - **One completion**: the callback fires once, after every resolver has
//!   completed, with all errors in completion order
//! - **No re-expansion**: a substituted value is never scanned again
//!
//! ## Example
//!
//! ```rust
//! use subst_core::{substitute, Document, Replacements};
//!
//! let doc = Document::from("{foo} zoo");
//! let replacements = Replacements::new().resolver("foo", |done| done.resolve("crazy"));
//!
//! substitute(&doc, replacements, |errors, result| {
//!     assert!(errors.is_none());
//!     assert_eq!(result.as_str(), Some("crazy zoo"));
//! });
//! ```
//!
//! [`Document`]: crate::document::Document

pub mod engine;
pub mod error;

pub use engine::{
    substitute, substitute_async, Done, Replacement, Replacements, Resolver, Substituter,
    Substitution,
};
pub use error::ResolveError;
