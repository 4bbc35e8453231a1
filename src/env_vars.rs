//! Centralized environment variable registry.
//!
//! Single source of truth for every environment variable pipegit reads:
//! the `GERRIT_*` values exported by the review trigger and the `PIPEGIT_`
//! configuration overrides (`__` separator for nested config paths).
//! Consumed by the `env` subcommand.

/// An environment variable definition
#[derive(Debug, Clone)]
pub struct EnvVar {
    /// Environment variable name (e.g., "GERRIT_REFSPEC")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Category for grouping in documentation
    pub category: EnvVarCategory,
    /// Whether this variable is required for operation
    pub required: bool,
    /// Default value if not set
    pub default: Option<&'static str>,
}

/// Categories for organizing environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVarCategory {
    /// Values exported by the gerrit review trigger
    Trigger,
    /// Checkout defaults
    Checkout,
    /// Logging configuration
    Logging,
}

impl EnvVarCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            EnvVarCategory::Trigger => "Review trigger",
            EnvVarCategory::Checkout => "Checkout",
            EnvVarCategory::Logging => "Logging",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [EnvVarCategory] {
        &[
            EnvVarCategory::Trigger,
            EnvVarCategory::Checkout,
            EnvVarCategory::Logging,
        ]
    }
}

/// Static registry of all documented environment variables
pub static ENV_VARS: &[EnvVar] = &[
    // === Review trigger ===
    // Required by `checkout-gerrit`, absent outside a triggered execution.
    EnvVar {
        name: "GERRIT_BRANCH",
        description: "Target branch of the change under review",
        category: EnvVarCategory::Trigger,
        required: true,
        default: None,
    },
    EnvVar {
        name: "GERRIT_NAME",
        description: "Remote user name used in the checkout URL",
        category: EnvVarCategory::Trigger,
        required: true,
        default: None,
    },
    EnvVar {
        name: "GERRIT_HOST",
        description: "Hostname of the review server",
        category: EnvVarCategory::Trigger,
        required: true,
        default: None,
    },
    EnvVar {
        name: "GERRIT_PORT",
        description: "SSH port of the review server",
        category: EnvVarCategory::Trigger,
        required: true,
        default: None,
    },
    EnvVar {
        name: "GERRIT_PROJECT",
        description: "Project path of the change under review",
        category: EnvVarCategory::Trigger,
        required: true,
        default: None,
    },
    EnvVar {
        name: "GERRIT_REFSPEC",
        description: "Refspec of the triggering patchset",
        category: EnvVarCategory::Trigger,
        required: true,
        default: None,
    },
    // === Checkout ===
    EnvVar {
        name: "PIPEGIT_CHECKOUT__PORT",
        description: "Default SSH port for checkout requests",
        category: EnvVarCategory::Checkout,
        required: false,
        default: Some("29418"),
    },
    EnvVar {
        name: "PIPEGIT_CHECKOUT__TARGET_DIR",
        description: "Default checkout directory relative to the workspace root",
        category: EnvVarCategory::Checkout,
        required: false,
        default: Some("./"),
    },
    EnvVar {
        name: "PIPEGIT_CHECKOUT__WORKSPACE",
        description: "Workspace root target directories are resolved against",
        category: EnvVarCategory::Checkout,
        required: false,
        default: Some("."),
    },
    EnvVar {
        name: "PIPEGIT_CHECKOUT__CREDENTIALS_ID",
        description: "Credentials id used when --credentials is not given",
        category: EnvVarCategory::Checkout,
        required: false,
        default: None,
    },
    // === Logging ===
    EnvVar {
        name: "PIPEGIT_LOGGING__LEVEL",
        description: "Log level (trace, debug, info, warn, error)",
        category: EnvVarCategory::Logging,
        required: false,
        default: Some("info"),
    },
];

/// Get all environment variables for a given category
pub fn env_vars_for_category(category: EnvVarCategory) -> impl Iterator<Item = &'static EnvVar> {
    ENV_VARS.iter().filter(move |v| v.category == category)
}

/// Get environment variables grouped by category
pub fn env_vars_by_category() -> Vec<(EnvVarCategory, Vec<&'static EnvVar>)> {
    EnvVarCategory::all()
        .iter()
        .map(|cat| {
            let vars: Vec<&EnvVar> = env_vars_for_category(*cat).collect();
            (*cat, vars)
        })
        .filter(|(_, vars)| !vars.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_env_vars_have_descriptions() {
        for var in ENV_VARS {
            assert!(
                !var.description.is_empty(),
                "EnvVar {} has empty description",
                var.name
            );
        }
    }

    #[test]
    fn all_env_vars_have_known_prefix() {
        for var in ENV_VARS {
            assert!(
                var.name.starts_with("GERRIT_") || var.name.starts_with("PIPEGIT_"),
                "EnvVar {} has unexpected prefix",
                var.name
            );
        }
    }

    #[test]
    fn trigger_variables_match_gerrit_context() {
        let trigger: Vec<&str> = env_vars_for_category(EnvVarCategory::Trigger)
            .map(|v| v.name)
            .collect();
        assert_eq!(
            trigger,
            vec![
                "GERRIT_BRANCH",
                "GERRIT_NAME",
                "GERRIT_HOST",
                "GERRIT_PORT",
                "GERRIT_PROJECT",
                "GERRIT_REFSPEC",
            ]
        );
    }

    #[test]
    fn grouped_registry_is_complete() {
        let grouped = env_vars_by_category();
        let total: usize = grouped.iter().map(|(_, vars)| vars.len()).sum();
        assert_eq!(total, ENV_VARS.len());
    }
}
