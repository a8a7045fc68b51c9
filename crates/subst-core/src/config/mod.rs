//! Substitution options loaded from TOML

pub mod model;

pub use model::{ErrorFallback, Occurrences, SubstituteOptions};
