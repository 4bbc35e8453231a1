//! Gerrit patchset checkout builder.
//!
//! The review trigger exports its context through `GERRIT_*` environment
//! variables. [`GerritContext`] makes that dependency explicit: callers pass
//! the context in rather than the builder reading globals.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

use super::error::ScmError;
use super::executor::ScmExecutor;
use super::spec::{CheckoutExtension, CheckoutSpec, RemoteSpec};

/// Ambient values exported by the gerrit review trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerritContext {
    /// Target branch of the change (`GERRIT_BRANCH`)
    pub branch: String,
    /// Remote user name used in the checkout URL (`GERRIT_NAME`)
    pub user: String,
    /// Review host (`GERRIT_HOST`)
    pub host: String,
    /// Review SSH port (`GERRIT_PORT`)
    pub port: String,
    /// Project path (`GERRIT_PROJECT`)
    pub project: String,
    /// Refspec of the triggering patchset (`GERRIT_REFSPEC`)
    pub refspec: String,
}

impl GerritContext {
    /// Read the trigger context from the environment.
    ///
    /// Fails with [`ScmError::MissingContext`] naming the first absent
    /// variable, which happens when invoked outside a review-triggered
    /// execution.
    pub fn from_env() -> Result<Self, ScmError> {
        Ok(Self {
            branch: require("GERRIT_BRANCH")?,
            user: require("GERRIT_NAME")?,
            host: require("GERRIT_HOST")?,
            port: require("GERRIT_PORT")?,
            project: require("GERRIT_PROJECT")?,
            refspec: require("GERRIT_REFSPEC")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ScmError> {
    env::var(name).map_err(|_| ScmError::MissingContext(name))
}

/// Configuration for checking out the patchset of the triggering review event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GerritCheckout {
    pub credentials_id: String,
    #[serde(default)]
    pub with_merge: bool,
    #[serde(default)]
    pub with_wipe_out: bool,
}

impl GerritCheckout {
    pub fn new(credentials_id: impl Into<String>) -> Self {
        Self {
            credentials_id: credentials_id.into(),
            with_merge: false,
            with_wipe_out: false,
        }
    }

    /// Build the declarative checkout request from the trigger context.
    pub fn build(&self, ctx: &GerritContext) -> CheckoutSpec {
        let mut extensions = vec![CheckoutExtension::Clean, CheckoutExtension::BuildChooser];
        if self.with_merge {
            // same rationale as the ssh builder: keep HEAD attached after
            // the patchset is applied
            extensions.push(CheckoutExtension::LocalBranch(ctx.branch.clone()));
        }
        if self.with_wipe_out {
            // full wipe before checkout, for stale or poisoned workspaces
            extensions.push(CheckoutExtension::WipeWorkspace);
        }

        let url = format!(
            "ssh://{}@{}:{}/{}.git",
            ctx.user, ctx.host, ctx.port, ctx.project
        );

        CheckoutSpec {
            branch: ctx.branch.clone(),
            extensions,
            remote: RemoteSpec {
                name: "gerrit".to_string(),
                url,
                credentials_id: self.credentials_id.clone(),
                refspec: Some(ctx.refspec.clone()),
            },
        }
    }

    /// Build the request and hand it to the executor.
    pub async fn submit(
        &self,
        ctx: &GerritContext,
        executor: &dyn ScmExecutor,
    ) -> Result<(), ScmError> {
        let spec = self.build(ctx);
        debug!(url = %spec.remote.url, refspec = ?spec.remote.refspec, "Submitting gerrit checkout");
        executor.checkout(&spec).await
    }
}
