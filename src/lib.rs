//! Pipegit - git introspection and declarative checkout helpers for CI pipelines.
//!
//! Two concerns, nothing else:
//! - inspect the current working tree (HEAD commit, tag-based describe string)
//! - build declarative checkout requests and submit them to an SCM executor

pub mod checkout;
pub mod config;
pub mod env_vars;
pub mod git;
pub mod logging;
