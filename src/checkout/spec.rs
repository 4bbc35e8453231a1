//! The declarative checkout data model.

use serde::{Deserialize, Serialize};

/// A checkout behavior directive.
///
/// Closed set; executors translate each variant into concrete git
/// operations at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutExtension {
    /// Reset and clean the working tree as part of checkout
    Clean,
    /// Check out into this directory, relative to the workspace root
    RelativeTargetDir(String),
    /// Leave HEAD attached to this branch after checkout
    LocalBranch(String),
    /// Remove the entire target directory before checkout
    WipeWorkspace,
    /// Check out the commit of the triggering review event
    BuildChooser,
}

/// A named remote with credentials and an optional refspec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSpec {
    pub name: String,
    pub url: String,
    pub credentials_id: String,
    pub refspec: Option<String>,
}

/// A declarative checkout request.
///
/// Built once, submitted once, discarded. Nothing here is validated; a
/// missing or empty value surfaces as an executor failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSpec {
    pub branch: String,
    pub extensions: Vec<CheckoutExtension>,
    pub remote: RemoteSpec,
}

impl CheckoutSpec {
    /// Target directory relative to the workspace root (`./` when unset)
    pub fn target_dir(&self) -> &str {
        self.extensions
            .iter()
            .find_map(|e| match e {
                CheckoutExtension::RelativeTargetDir(dir) => Some(dir.as_str()),
                _ => None,
            })
            .unwrap_or("./")
    }

    /// Branch to leave HEAD attached to, if requested
    pub fn local_branch(&self) -> Option<&str> {
        self.extensions.iter().find_map(|e| match e {
            CheckoutExtension::LocalBranch(branch) => Some(branch.as_str()),
            _ => None,
        })
    }

    pub fn wants_clean(&self) -> bool {
        self.extensions.contains(&CheckoutExtension::Clean)
    }

    pub fn wants_wipe(&self) -> bool {
        self.extensions.contains(&CheckoutExtension::WipeWorkspace)
    }

    pub fn uses_build_chooser(&self) -> bool {
        self.extensions.contains(&CheckoutExtension::BuildChooser)
    }
}
