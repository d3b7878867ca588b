//! # repostack
//!
//! `repostack` tracks a stack of Git repositories living under one root
//! directory. It records, per repository, the set of remotes that repository
//! should carry, and reconciles that record against what actually exists on
//! disk. It powers the `repostack` CLI tool.
//!
//! ## Core Features
//!
//! - **Discovery**: walks the root for working copies, without descending
//!   into a repository once one is found.
//! - **Reconciliation**: merges observed remotes into the tracking record
//!   (`add`) or pushes the record back onto disk (`checkout`), warning on
//!   conflicting URLs instead of silently overwriting.
//! - **Batch execution**: runs an arbitrary command in every available
//!   tracked repository through a bounded worker pool, capturing each
//!   repository's outcome independently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repostack::discovery::discover_all;
//! use repostack::vcs::GitBackend;
//!
//! let repos = discover_all(std::path::Path::new("."), &GitBackend);
//! for path in repos {
//!     println!("{path}");
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod materialize;
pub mod reconcile;
pub mod runner;
pub mod store;
pub mod vcs;
