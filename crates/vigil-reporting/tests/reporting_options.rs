//! End-to-end loading of reporting options.

use std::path::PathBuf;

use vigil_core::env::MapEnv;
use vigil_reporting::{ConfigError, ConfigLoader, Severity, decode_and_validate};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

const GITHUB_DOC: &str = "
github:
  username: $GITHUB_USER
  owner: $GITHUB_OWNER
  token: $GITHUB_TOKEN
  project-name: $GITHUB_PROJECT
  issue-label: $ISSUE_LABEL
  severity-as-label: false";

#[test]
fn test_filters_from_file() {
    let config = ConfigLoader::new()
        .file(fixture("issue-tracker-config1.yaml"))
        .env_source(MapEnv::new())
        .load()
        .unwrap();

    assert_eq!(
        config.filters.allow.as_slice(),
        &[Severity::High, Severity::Critical]
    );
    assert_eq!(config.filters.deny.as_slice(), &[Severity::Low]);
}

#[test]
fn test_filters_equal_across_surface_syntax() {
    let first = ConfigLoader::new()
        .file(fixture("issue-tracker-config1.yaml"))
        .env_source(MapEnv::new())
        .load()
        .unwrap();
    let second = ConfigLoader::new()
        .file(fixture("issue-tracker-config2.yaml"))
        .env_source(MapEnv::new())
        .load()
        .unwrap();

    assert_eq!(first.filters, second.filters);
}

#[test]
fn test_single_variable_resolved() {
    let config = ConfigLoader::new()
        .source(GITHUB_DOC)
        .env_source(MapEnv::new().with("GITHUB_USER", "testuser"))
        .load()
        .unwrap();

    assert_eq!(config.options.github.unwrap().username, "testuser");
}

#[test]
fn test_multiple_variables_resolved() {
    let env = MapEnv::new()
        .with("GITHUB_USER", "testuser")
        .with("GITHUB_TOKEN", "tokentesthere")
        .with("GITHUB_PROJECT", "testproject");
    let config = ConfigLoader::new()
        .source(GITHUB_DOC)
        .env_source(env)
        .load()
        .unwrap();
    let github = config.options.github.unwrap();

    assert_eq!(github.username, "testuser");
    assert_eq!(github.token, "tokentesthere");
    assert_eq!(github.project_name, "testproject");
    assert_eq!(github.owner, "$GITHUB_OWNER");
    assert_eq!(github.issue_label.as_deref(), Some("$ISSUE_LABEL"));
}

#[test]
fn test_unset_variable_keeps_reference() {
    let config = ConfigLoader::new()
        .source(GITHUB_DOC)
        .env_source(MapEnv::new().with("GITHUB_USER", "alice"))
        .load()
        .unwrap();
    let github = config.options.github.as_ref().unwrap();

    assert_eq!(github.username, "alice");
    assert_eq!(github.token, "$GITHUB_TOKEN");

    let unresolved: Vec<&str> = config
        .report
        .unresolved
        .iter()
        .map(|t| t.path.as_str())
        .collect();
    assert_eq!(
        unresolved,
        vec![
            "github.owner",
            "github.token",
            "github.project-name",
            "github.issue-label",
        ]
    );
}

#[test]
fn test_empty_required_field_fails_before_resolution() {
    let doc = "
github:
  username: \"\"
  owner: $GITHUB_OWNER
  token: $GITHUB_TOKEN
  project-name: $GITHUB_PROJECT
  issue-label: $ISSUE_LABEL
  severity-as-label: false";

    let err = decode_and_validate(doc.as_bytes()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { ref field } if field == "github.username"));

    let result = ConfigLoader::new()
        .source(doc)
        .env_source(MapEnv::new().with("GITHUB_OWNER", "acme"))
        .load();
    assert!(matches!(result, Err(ConfigError::MissingField { .. })));
}

#[test]
fn test_several_trackers_resolved_independently() {
    let env = MapEnv::new()
        .with("GITLAB_USER", "gl-bot")
        .with("JIRA_URL", "https://acme.atlassian.net")
        .with("JIRA_TOKEN", "");
    let config = ConfigLoader::new()
        .file(fixture("issue-tracker-config2.yaml"))
        .env_source(env)
        .load()
        .unwrap();

    let gitlab = config.options.gitlab.unwrap();
    assert_eq!(gitlab.username, "gl-bot");
    assert_eq!(gitlab.token, "$GITLAB_TOKEN");
    assert_eq!(gitlab.base_url.as_deref(), Some("https://gitlab.acme.test"));
    assert!(gitlab.severity_as_label);

    let jira = config.options.jira.unwrap();
    assert_eq!(jira.url, "https://acme.atlassian.net");
    assert_eq!(jira.token, "");
    assert_eq!(jira.account_id, "$JIRA_ACCOUNT");
    assert_eq!(jira.issue_type, "Bug");
    assert!(config.options.github.is_none());
}

#[test]
fn test_discovers_file_in_search_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("reporting.yml"),
        "allow-list:\n  severity: medium\n",
    )
    .unwrap();

    let config = ConfigLoader::new()
        .search_path(dir.path())
        .env_source(MapEnv::new())
        .load()
        .unwrap();

    assert_eq!(config.filters.allow.as_slice(), &[Severity::Medium]);
}

#[test]
fn test_no_file_found_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = ConfigLoader::new()
        .search_path(dir.path())
        .env_source(MapEnv::new())
        .load()
        .unwrap();

    assert!(config.filters.allow.is_empty());
    assert!(!config.options.has_trackers());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reporting.ini");
    std::fs::write(&path, "[github]").unwrap();

    let result = ConfigLoader::new().file(&path).load();

    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
}

#[test]
fn test_resolved_options_serialize() {
    let config = ConfigLoader::new()
        .file(fixture("issue-tracker-config1.yaml"))
        .env_source(MapEnv::new().with("GITHUB_USER", "alice"))
        .load()
        .unwrap();

    let json = serde_json::to_value(&config.options).unwrap();
    assert_eq!(json["github"]["username"], "alice");
    assert_eq!(json["allow-list"]["severity"][0], "high");
    assert_eq!(serde_json::to_value(&config.filters).unwrap()["deny"][0], "low");
}
