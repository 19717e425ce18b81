//! Reporting options schema.
//!
//! ```yaml
//! allow-list:
//!   severity: high, critical
//! deny-list:
//!   severity: low
//!
//! github:
//!   username: $GITHUB_USER
//!   owner: $GITHUB_OWNER
//!   token: $GITHUB_TOKEN
//!   project-name: $GITHUB_PROJECT
//!   issue-label: $ISSUE_LABEL
//!   severity-as-label: false
//! ```
//!
//! Tracker blocks are optional. String fields may hold a `$NAME` reference,
//! resolved after validation.

use serde::{Deserialize, Serialize};
use vigil_core::{ResolveEnv, SeveritySet};

/// Root reporting configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ResolveEnv)]
#[serde(rename_all = "kebab-case")]
pub struct ReportingOptions {
    /// Severities that may be reported. Empty means all.
    #[serde(default)]
    #[env(rename = "allow-list")]
    pub allow_list: Option<Filter>,

    /// Severities that are never reported.
    #[serde(default)]
    #[env(rename = "deny-list")]
    pub deny_list: Option<Filter>,

    /// GitHub issue tracker.
    #[serde(default)]
    pub github: Option<GitHubOptions>,

    /// GitLab issue tracker.
    #[serde(default)]
    pub gitlab: Option<GitLabOptions>,

    /// Jira issue tracker.
    #[serde(default)]
    pub jira: Option<JiraOptions>,
}

impl ReportingOptions {
    /// Returns true if at least one tracker block is configured.
    pub fn has_trackers(&self) -> bool {
        self.github.is_some() || self.gitlab.is_some() || self.jira.is_some()
    }
}

/// An allow or deny list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ResolveEnv)]
pub struct Filter {
    /// Severities matched by this list.
    #[serde(default)]
    pub severity: SeveritySet,
}

/// GitHub tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ResolveEnv)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubOptions {
    /// API base URL for GitHub Enterprise installations.
    #[serde(default)]
    #[env(rename = "base-url")]
    pub base_url: Option<String>,

    /// Account that files issues.
    pub username: String,

    /// Repository owner.
    pub owner: String,

    /// Personal access token.
    pub token: String,

    /// Repository name.
    #[env(rename = "project-name")]
    pub project_name: String,

    /// Label added to every issue.
    #[serde(default)]
    #[env(rename = "issue-label")]
    pub issue_label: Option<String>,

    /// Add the finding severity as an extra label.
    #[serde(default)]
    #[env(rename = "severity-as-label")]
    pub severity_as_label: bool,
}

/// GitLab tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ResolveEnv)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabOptions {
    /// Self-hosted instance URL.
    #[serde(default)]
    #[env(rename = "base-url")]
    pub base_url: Option<String>,

    /// Account that files issues.
    pub username: String,

    /// Personal access token.
    pub token: String,

    /// Project path or numeric id.
    #[env(rename = "project-name")]
    pub project_name: String,

    /// Label added to every issue.
    #[serde(default)]
    #[env(rename = "issue-label")]
    pub issue_label: Option<String>,

    /// Add the finding severity as an extra label.
    #[serde(default)]
    #[env(rename = "severity-as-label")]
    pub severity_as_label: bool,
}

/// Jira tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ResolveEnv)]
#[serde(rename_all = "kebab-case")]
pub struct JiraOptions {
    /// Jira Cloud rather than a self-hosted server.
    #[serde(default)]
    pub cloud: bool,

    /// Update an open issue instead of filing a duplicate.
    #[serde(default)]
    #[env(rename = "update-existing")]
    pub update_existing: bool,

    /// Instance URL.
    pub url: String,

    /// Account id of the reporter (Cloud).
    #[env(rename = "account-id")]
    pub account_id: String,

    /// Account email.
    pub email: String,

    /// API token.
    pub token: String,

    /// Project key.
    #[env(rename = "project-name")]
    pub project_name: String,

    /// Issue type to create.
    #[serde(default = "default_issue_type")]
    #[env(rename = "issue-type")]
    pub issue_type: String,

    /// Add the finding severity as a label.
    #[serde(default)]
    #[env(rename = "severity-as-label")]
    pub severity_as_label: bool,
}

fn default_issue_type() -> String {
    "Bug".to_string()
}
