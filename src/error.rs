//! Structural error types.
//!
//! Only precondition violations live here: an operation that needs a
//! tracking file which is absent, or an `init` into an already-managed
//! tree. Per-repository problems (conflicting remote URLs, a failing batch
//! command) are reported as warnings or tagged results and never abort an
//! operation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation requires a tracking file that does not exist.
    #[error("this directory is not managed by repostack (file \"{}\" does not exist)", .path.display())]
    NotManaged { path: PathBuf },

    /// `init` was attempted on a tree that already has a tracking file,
    /// either at the root itself or in an ancestor directory.
    #[error("repostack already manages this directory (file \"{}\" exists)", .path.display())]
    AlreadyManaged { path: PathBuf },
}
