//! Test utilities for subst
//!
//! This crate provides shared testing utilities used across the subst workspace:
//! resolver stubs that count, park, or fail, a completion recorder, and
//! fixture documents.

use tempfile::TempDir;

pub mod fixtures;
pub mod resolvers;

pub use fixtures::{complex_subject, config_subject};
pub use resolvers::{CallCounter, Parked, Recorder};

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test temporary files land in one gitignored location that is easy to
/// clean up manually.
///
/// # Panics
///
/// Panics if the current directory or the `.tmp/` directory cannot be
/// resolved or created.
///
/// # Examples
///
/// ```rust
/// use subst_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("subst.toml");
/// std::fs::write(&file_path, "[substitute]\n").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");

    // Ensure .tmp/ exists
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}
