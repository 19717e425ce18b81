//! Configuration validation utilities.
//!
//! Runs on the decoded options before environment references are resolved,
//! so a `$NAME` reference counts as a present value.

use vigil_core::env::parse_env_token;

use super::error::{ConfigError, ConfigResult};
use super::schema::{GitHubOptions, GitLabOptions, JiraOptions, ReportingOptions};

/// Validates the entire configuration.
pub fn validate_options(options: &ReportingOptions) -> ConfigResult<()> {
    if let Some(github) = &options.github {
        validate_github(github)?;
    }
    if let Some(gitlab) = &options.gitlab {
        validate_gitlab(gitlab)?;
    }
    if let Some(jira) = &options.jira {
        validate_jira(jira)?;
    }
    Ok(())
}

fn validate_github(github: &GitHubOptions) -> ConfigResult<()> {
    require(&github.username, "github.username")?;
    require(&github.owner, "github.owner")?;
    require(&github.token, "github.token")?;
    require(&github.project_name, "github.project-name")?;
    if let Some(url) = &github.base_url {
        validate_url(url, "github.base-url")?;
    }
    Ok(())
}

fn validate_gitlab(gitlab: &GitLabOptions) -> ConfigResult<()> {
    require(&gitlab.username, "gitlab.username")?;
    require(&gitlab.token, "gitlab.token")?;
    require(&gitlab.project_name, "gitlab.project-name")?;
    if let Some(url) = &gitlab.base_url {
        validate_url(url, "gitlab.base-url")?;
    }
    Ok(())
}

fn validate_jira(jira: &JiraOptions) -> ConfigResult<()> {
    require(&jira.url, "jira.url")?;
    require(&jira.account_id, "jira.account-id")?;
    require(&jira.email, "jira.email")?;
    require(&jira.token, "jira.token")?;
    require(&jira.project_name, "jira.project-name")?;
    require(&jira.issue_type, "jira.issue-type")?;
    validate_url(&jira.url, "jira.url")?;
    Ok(())
}

/// Rejects empty or whitespace-only required values.
fn require(value: &str, field: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::missing_field(field));
    }
    Ok(())
}

/// Validates an HTTP(S) URL unless it is still an environment reference.
fn validate_url(url: &str, field: &str) -> ConfigResult<()> {
    if parse_env_token(url).is_some() {
        return Ok(());
    }

    let valid_schemes = ["http://", "https://"];
    if !valid_schemes.iter().any(|s| url.starts_with(s)) {
        return Err(ConfigError::validation(format!(
            "{field} must start with one of: {valid_schemes:?}, got '{url}'"
        )));
    }

    Ok(())
}
