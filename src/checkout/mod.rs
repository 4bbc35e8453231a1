//! Declarative checkout - typed requests submitted to an SCM executor.
//!
//! Builders produce a [`CheckoutSpec`] describing branch, remote, and a
//! closed set of checkout behaviors. An [`ScmExecutor`] translates the spec
//! into clone/fetch/checkout operations against the workspace.

mod error;
mod executor;
mod gerrit;
mod spec;
mod ssh;

pub use error::ScmError;
pub use executor::{GitScmExecutor, RecordingExecutor, ScmExecutor};
pub use gerrit::{GerritCheckout, GerritContext};
pub use spec::{CheckoutExtension, CheckoutSpec, RemoteSpec};
pub use ssh::SshCheckout;
