//! SSH branch checkout builder.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ScmError;
use super::executor::ScmExecutor;
use super::spec::{CheckoutExtension, CheckoutSpec, RemoteSpec};

/// Configuration for a direct SSH clone of a named branch.
///
/// `credentials_id`, `branch`, `host`, and `project` must be non-empty for
/// the request to be meaningful; emptiness is not checked here and surfaces
/// as an executor failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshCheckout {
    pub credentials_id: String,
    pub branch: String,
    pub host: String,
    pub project: String,
    #[serde(default = "default_target_dir")]
    pub target_dir: String,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub with_merge: bool,
}

fn default_target_dir() -> String {
    "./".to_string()
}

fn default_port() -> String {
    "29418".to_string()
}

impl SshCheckout {
    /// Create a request with the required fields and default everything else
    pub fn new(
        credentials_id: impl Into<String>,
        branch: impl Into<String>,
        host: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            credentials_id: credentials_id.into(),
            branch: branch.into(),
            host: host.into(),
            project: project.into(),
            target_dir: default_target_dir(),
            port: default_port(),
            with_merge: false,
        }
    }

    /// Build the declarative checkout request.
    pub fn build(&self) -> CheckoutSpec {
        let mut extensions = vec![
            CheckoutExtension::Clean,
            CheckoutExtension::RelativeTargetDir(self.target_dir.clone()),
        ];
        if self.with_merge {
            // keeps HEAD attached so follow-up commands see a branch,
            // not a detached commit
            extensions.push(CheckoutExtension::LocalBranch(self.branch.clone()));
        }

        let url = format!(
            "ssh://{}@{}:{}/{}.git",
            self.credentials_id, self.host, self.port, self.project
        );

        CheckoutSpec {
            branch: self.branch.clone(),
            extensions,
            remote: RemoteSpec {
                name: "origin".to_string(),
                url,
                credentials_id: self.credentials_id.clone(),
                refspec: None,
            },
        }
    }

    /// Build the request and hand it to the executor.
    pub async fn submit(&self, executor: &dyn ScmExecutor) -> Result<(), ScmError> {
        let spec = self.build();
        debug!(url = %spec.remote.url, branch = %spec.branch, "Submitting ssh checkout");
        executor.checkout(&spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::executor::RecordingExecutor;

    #[test]
    fn defaults_match_contract() {
        let req = SshCheckout::new("u", "main", "h", "p");
        assert_eq!(req.target_dir, "./");
        assert_eq!(req.port, "29418");
        assert!(!req.with_merge);
    }

    #[test]
    fn builds_origin_remote_with_ssh_url() {
        let spec = SshCheckout::new("u", "main", "h", "p").build();
        assert_eq!(spec.remote.name, "origin");
        assert_eq!(spec.remote.url, "ssh://u@h:29418/p.git");
        assert_eq!(spec.remote.credentials_id, "u");
        assert_eq!(spec.remote.refspec, None);
        assert_eq!(spec.branch, "main");
    }

    #[test]
    fn default_build_has_clean_and_target_but_no_local_branch() {
        let spec = SshCheckout::new("u", "main", "h", "p").build();
        assert!(spec.wants_clean());
        assert_eq!(spec.target_dir(), "./");
        assert_eq!(spec.local_branch(), None);
    }

    #[test]
    fn with_merge_adds_local_branch() {
        let mut req = SshCheckout::new("u", "feature/x", "h", "p");
        req.with_merge = true;
        let spec = req.build();
        assert_eq!(spec.local_branch(), Some("feature/x"));
    }

    #[test]
    fn custom_port_and_target_dir_flow_through() {
        let mut req = SshCheckout::new("ci", "main", "gerrit.example.com", "tools/build");
        req.port = "2222".to_string();
        req.target_dir = "checkout/build".to_string();
        let spec = req.build();
        assert_eq!(
            spec.remote.url,
            "ssh://ci@gerrit.example.com:2222/tools/build.git"
        );
        assert_eq!(spec.target_dir(), "checkout/build");
    }

    #[tokio::test]
    async fn submit_hands_spec_to_executor() {
        let executor = RecordingExecutor::new();
        let req = SshCheckout::new("u", "main", "h", "p");
        req.submit(&executor).await.unwrap();

        let submitted = executor.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0], req.build());
    }
}
