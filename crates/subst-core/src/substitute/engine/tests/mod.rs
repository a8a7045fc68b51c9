//! Tests for the substitution engine
//!
//! Organized into focused submodules by behaviour.

use super::*;

// Test helper functions
mod helpers;


// Error, fallback, and option tests
mod errors;
