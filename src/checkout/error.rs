use thiserror::Error;

/// Errors surfaced by checkout submission.
///
/// All variants are pass-through: no retry, no partial success. A failure
/// aborts the calling pipeline step.
#[derive(Error, Debug)]
pub enum ScmError {
    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("checkout of '{url}' failed: {reason}")]
    CheckoutFailed { url: String, reason: String },

    #[error("review trigger variable {0} is not set")]
    MissingContext(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
