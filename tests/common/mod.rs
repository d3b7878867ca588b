//! Shared test utilities

pub mod git;
