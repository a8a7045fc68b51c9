// Core modules
pub mod config;
pub mod document;
pub mod error;
pub mod substitute;

// Re-export commonly used types
pub use config::{ErrorFallback, Occurrences, SubstituteOptions};
pub use document::Document;
pub use error::{Result, SubstError};
pub use substitute::{
    substitute, substitute_async, Done, Replacement, Replacements, ResolveError, Resolver,
    Substituter, Substitution,
};
