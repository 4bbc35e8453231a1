//! SCM executor seam.
//!
//! [`ScmExecutor`] is the boundary checkout builders submit to. The real
//! implementation drives the git CLI; [`RecordingExecutor`] captures
//! submitted specs so builders can be tested without touching git.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::error::ScmError;
use super::spec::CheckoutSpec;

/// Performs clone + checkout for declarative checkout requests.
#[async_trait]
pub trait ScmExecutor: Send + Sync {
    /// Apply the request against the workspace. Raises on any failure;
    /// there is no partial success.
    async fn checkout(&self, spec: &CheckoutSpec) -> Result<(), ScmError>;
}

/// Executes checkout requests with the git CLI in a workspace directory.
pub struct GitScmExecutor {
    workspace: PathBuf,
}

impl GitScmExecutor {
    pub fn new(workspace: PathBuf) -> Self {
        Self { workspace }
    }

    /// Execute a git command and return stdout
    async fn run_git(&self, args: &[&str], cwd: &Path) -> Result<String, ScmError> {
        debug!(?args, ?cwd, "Running git command");

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ScmError::CommandFailed {
                command: (*args.first().unwrap_or(&"")).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn target_path(&self, spec: &CheckoutSpec) -> PathBuf {
        self.workspace.join(spec.target_dir())
    }
}

#[async_trait]
impl ScmExecutor for GitScmExecutor {
    #[instrument(skip_all, fields(url = %spec.remote.url, branch = %spec.branch))]
    async fn checkout(&self, spec: &CheckoutSpec) -> Result<(), ScmError> {
        let target = self.target_path(spec);

        if spec.wants_wipe() && target.exists() {
            debug!(path = %target.display(), "Wiping workspace before checkout");
            tokio::fs::remove_dir_all(&target).await?;
        }

        tokio::fs::create_dir_all(&target).await?;

        if target.join(".git").exists() {
            // reuse the existing clone, but make sure the remote points
            // where this request expects
            let set_url = self
                .run_git(
                    &["remote", "set-url", &spec.remote.name, &spec.remote.url],
                    &target,
                )
                .await;
            if set_url.is_err() {
                self.run_git(
                    &["remote", "add", &spec.remote.name, &spec.remote.url],
                    &target,
                )
                .await?;
            }
        } else {
            self.run_git(&["init"], &target).await?;
            self.run_git(
                &["remote", "add", &spec.remote.name, &spec.remote.url],
                &target,
            )
            .await?;
        }

        // Build-chooser requests check out the fetched patchset commit
        // (FETCH_HEAD); branch requests track the fetched branch head.
        // Either way the checkout is detached unless a local-branch
        // extension follows.
        let tracking_ref = format!("refs/remotes/{}/{}", spec.remote.name, spec.branch);
        let (fetch_ref, checkout_target) = if spec.uses_build_chooser() {
            let refspec = spec
                .remote
                .refspec
                .clone()
                .unwrap_or_else(|| spec.branch.clone());
            (refspec, "FETCH_HEAD".to_string())
        } else {
            (
                format!("+refs/heads/{}:{}", spec.branch, tracking_ref),
                tracking_ref,
            )
        };

        self.run_git(&["fetch", &spec.remote.name, &fetch_ref], &target)
            .await
            .map_err(|e| ScmError::CheckoutFailed {
                url: spec.remote.url.clone(),
                reason: e.to_string(),
            })?;

        let mut checkout_args = vec!["checkout"];
        if spec.wants_clean() {
            checkout_args.push("--force");
        }
        checkout_args.push(&checkout_target);
        self.run_git(&checkout_args, &target).await?;

        if spec.wants_clean() {
            self.run_git(&["clean", "-fdx"], &target).await?;
        }

        if let Some(branch) = spec.local_branch() {
            // leave HEAD attached so follow-up steps see a real branch
            self.run_git(&["checkout", "-B", branch], &target).await?;
        }

        Ok(())
    }
}

/// Test double that records every submitted spec instead of touching git.
#[derive(Default)]
pub struct RecordingExecutor {
    specs: Mutex<Vec<CheckoutSpec>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Specs submitted so far, in order
    pub fn submitted(&self) -> Vec<CheckoutSpec> {
        self.specs.lock().expect("executor mutex poisoned").clone()
    }
}

#[async_trait]
impl ScmExecutor for RecordingExecutor {
    async fn checkout(&self, spec: &CheckoutSpec) -> Result<(), ScmError> {
        self.specs
            .lock()
            .expect("executor mutex poisoned")
            .push(spec.clone());
        Ok(())
    }
}
