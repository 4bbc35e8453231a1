//! Git CLI wrapper for commit and describe introspection.
//!
//! Uses the git CLI directly (rather than libgit2) so the output is exactly
//! what pipeline steps see when they run git themselves.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Trailing abbreviated-commit suffix of a describe string (`-gabc1234`).
static DESCRIBE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-g[0-9a-f]+$").expect("valid regex"));

/// Low-level git command wrapper
pub struct GitCli;

impl GitCli {
    /// Execute a git command and return stdout
    async fn run_git(args: &[&str], cwd: &Path) -> Result<String> {
        debug!(?args, ?cwd, "Running git command");

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Get the HEAD commit SHA
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn head_commit(path: &Path) -> Result<String> {
        Self::run_git(&["rev-parse", "HEAD"], path).await
    }

    /// Get the `git describe --tags` string for HEAD.
    ///
    /// With `short`, the trailing `-g<sha>` suffix is stripped as a string
    /// transform, turning `v1.2.0-5-gabc1234` into `v1.2.0-5`. The git
    /// invocation is identical in both forms.
    ///
    /// Fails when no tag is reachable from HEAD.
    #[instrument(skip_all, fields(path = %path.display(), short))]
    pub async fn describe(path: &Path, short: bool) -> Result<String> {
        let described = Self::run_git(&["describe", "--tags"], path).await?;
        if short {
            Ok(strip_commit_suffix(&described))
        } else {
            Ok(described)
        }
    }
}

/// Remove the trailing `-g<hex>` suffix from a describe string, if present.
fn strip_commit_suffix(described: &str) -> String {
    DESCRIBE_SUFFIX.replace(described, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn strips_commit_suffix() {
        assert_eq!(strip_commit_suffix("v1.2.0-5-gabc1234"), "v1.2.0-5");
    }

    #[test]
    fn strips_only_trailing_suffix_of_hyphenated_tag() {
        assert_eq!(
            strip_commit_suffix("release-g1-rc2-3-gdeadbeef"),
            "release-g1-rc2-3"
        );
    }

    #[test]
    fn leaves_exact_tag_untouched() {
        // A tag checked out exactly describes without any suffix
        assert_eq!(strip_commit_suffix("v1.2.0"), "v1.2.0");
    }

    #[test]
    fn ignores_non_hex_suffix() {
        assert_eq!(strip_commit_suffix("v1.0-2-gxyz"), "v1.0-2-gxyz");
    }

    #[tokio::test]
    async fn head_commit_fails_outside_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitCli::head_commit(temp.path()).await;
        assert!(result.is_err(), "Should fail in a non-repo directory");
    }

    #[tokio::test]
    async fn describe_fails_outside_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitCli::describe(temp.path(), false).await;
        assert!(result.is_err(), "Should fail in a non-repo directory");
    }
}
