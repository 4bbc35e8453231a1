//! Git introspection - thin wrappers over the git CLI.

mod inspect;

pub use inspect::GitCli;
