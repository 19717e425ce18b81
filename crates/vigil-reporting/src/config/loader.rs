//! Reporting configuration loader using figment.
//!
//! Loading runs in a fixed order:
//!
//! 1. Read the document (inline text, explicit file, or discovered file)
//! 2. Decode it into [`ReportingOptions`]
//! 3. Validate required fields ([`validate_options`])
//! 4. Resolve `$NAME` references from the environment source
//! 5. Build the allow/deny severity filters
//!
//! A decode or validation failure stops the load at that step. Unset
//! environment variables do not: the reference is kept and reported.
//!
//! # Feature Flags
//!
//! - `toml-config`: also accept `.toml` files (`reporting.toml`)
//!
//! # Example
//!
//! ```rust,ignore
//! use vigil_reporting::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./reporting-config.yaml")
//!     .load()?;
//!
//! if config.filters.permits(severity) {
//!     // file the issue
//! }
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Yaml};
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
use tracing::{debug, info, warn};
use vigil_core::env::{EnvResolver, EnvSource, ProcessEnv, ResolveReport};

use super::error::{ConfigError, ConfigResult};
use super::schema::ReportingOptions;
use super::validation::validate_options;
use crate::filters::{SeverityFilters, build_filters};

/// File names tried in each search path, in order.
#[cfg(not(feature = "toml-config"))]
const CONFIG_FILE_NAMES: &[&str] = &["reporting.yaml", "reporting.yml", "reporting-config.yaml"];

/// File names tried in each search path, in order.
#[cfg(feature = "toml-config")]
const CONFIG_FILE_NAMES: &[&str] = &[
    "reporting.yaml",
    "reporting.yml",
    "reporting-config.yaml",
    "reporting.toml",
];

/// Document formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML document.
    Yaml,
    /// TOML document.
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Picks a format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Ok(Self::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    fn provider(self, text: &str) -> Figment {
        match self {
            Self::Yaml => Figment::from(Yaml::string(text)),
            #[cfg(feature = "toml-config")]
            Self::Toml => Figment::from(Toml::string(text)),
        }
    }
}

/// Decoded, validated and resolved reporting configuration.
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    /// Options with environment references substituted.
    pub options: ReportingOptions,
    /// Allow/deny severity filters.
    pub filters: SeverityFilters,
    /// What the resolution pass changed and what it could not.
    pub report: ResolveReport,
}

/// Decodes a YAML document from `reader` and validates it.
///
/// Environment references are left untouched.
pub fn decode_and_validate<R: Read>(mut reader: R) -> ConfigResult<ReportingOptions> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode_str(&text, ConfigFormat::Yaml)
}

/// Loads the file at `path` against the process environment.
pub fn load_reporting_options<P: AsRef<Path>>(path: P) -> ConfigResult<ReportingConfig> {
    ConfigLoader::new().file(path).load()
}

fn decode_str(text: &str, format: ConfigFormat) -> ConfigResult<ReportingOptions> {
    let options = if text.trim().is_empty() {
        debug!("Empty configuration document, using defaults");
        ReportingOptions::default()
    } else {
        format.provider(text).extract::<ReportingOptions>()?
    };

    validate_options(&options)?;
    Ok(options)
}

/// Reporting configuration loader.
///
/// # Example
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .search_path("/etc/vigil")
///     .with_user_config_dir()
///     .env_source(MapEnv::new().with("GITHUB_TOKEN", "t"))
///     .load()?;
/// ```
pub struct ConfigLoader {
    /// Inline document (overrides files).
    source: Option<String>,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Environment used to resolve `$NAME` references.
    env: Box<dyn EnvSource>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading the process environment.
    pub fn new() -> Self {
        Self {
            source: None,
            config_file: None,
            search_paths: Vec::new(),
            env: Box::new(ProcessEnv),
        }
    }

    /// Uses an inline YAML document.
    pub fn source(mut self, text: impl Into<String>) -> Self {
        self.source = Some(text.into());
        self
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds current directory to search paths.
    pub fn with_current_dir(self) -> Self {
        if let Ok(cwd) = std::env::current_dir() {
            self.search_path(cwd)
        } else {
            self
        }
    }

    /// Adds user config directory to search paths.
    pub fn with_user_config_dir(self) -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            self.search_path(config_dir.join("vigil"))
        } else {
            self
        }
    }

    /// Replaces the environment used for reference resolution.
    pub fn env_source(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Decodes and validates without resolving references.
    pub fn decode(&self) -> ConfigResult<ReportingOptions> {
        if let Some(text) = &self.source {
            return decode_str(text, ConfigFormat::Yaml);
        }

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            return Self::decode_file(path);
        }

        match self.find_config_file() {
            Some(path) => Self::decode_file(&path),
            None => {
                warn!("No reporting configuration file found, using defaults");
                Ok(ReportingOptions::default())
            }
        }
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<ReportingConfig> {
        let mut options = self.decode()?;

        let report = EnvResolver::new(self.env.as_ref()).resolve(&mut options);
        for token in &report.unresolved {
            warn!(
                field = %token.path,
                name = %token.name,
                "Environment variable not set, reference left unresolved"
            );
        }

        let filters = build_filters(&options);

        debug!(
            allow = %filters.allow,
            deny = %filters.deny,
            trackers = options.has_trackers(),
            "Reporting configuration loaded"
        );

        Ok(ReportingConfig {
            options,
            filters,
            report,
        })
    }

    fn decode_file(path: &Path) -> ConfigResult<ReportingOptions> {
        let format = ConfigFormat::from_path(path)?;
        info!(path = %path.display(), "Loading reporting configuration file");
        let text = std::fs::read_to_string(path)?;
        decode_str(&text, format)
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("vigil"));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        for search_path in self.resolve_search_paths() {
            for name in CONFIG_FILE_NAMES {
                let candidate = search_path.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::Severity;
    use vigil_core::env::MapEnv;

    const GITHUB_DOC: &str = "
github:
  username: $GITHUB_USER
  owner: $GITHUB_OWNER
  token: $GITHUB_TOKEN
  project-name: $GITHUB_PROJECT
  issue-label: $ISSUE_LABEL
  severity-as-label: false";

    #[test]
    fn test_decode_keeps_references() {
        let options = decode_and_validate(GITHUB_DOC.as_bytes()).unwrap();
        let github = options.github.unwrap();

        assert_eq!(github.username, "$GITHUB_USER");
        assert_eq!(github.issue_label.as_deref(), Some("$ISSUE_LABEL"));
        assert!(!github.severity_as_label);
    }

    #[test]
    fn test_empty_document_is_default() {
        let options = decode_and_validate("  \n".as_bytes()).unwrap();
        assert_eq!(options, ReportingOptions::default());
    }

    #[test]
    fn test_syntax_error() {
        let result = decode_and_validate("github: [unclosed".as_bytes());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_severity_is_parse_error() {
        let result = decode_and_validate("allow-list:\n  severity: high, urgent\n".as_bytes());
        match result {
            Err(ConfigError::ParseError(message)) => assert!(message.contains("urgent")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_key_is_parse_error() {
        let result = decode_and_validate("github:\n  username: bob\n".as_bytes());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_resolves_with_injected_env() {
        let config = ConfigLoader::new()
            .source(GITHUB_DOC)
            .env_source(MapEnv::new().with("GITHUB_USER", "alice"))
            .load()
            .unwrap();
        let github = config.options.github.unwrap();

        assert_eq!(github.username, "alice");
        assert_eq!(github.token, "$GITHUB_TOKEN");
        assert_eq!(config.report.resolved, vec!["github.username"]);
        assert!(config.report.is_unresolved("github.token"));
    }

    #[test]
    fn test_load_builds_filters() {
        let config = ConfigLoader::new()
            .source("allow-list:\n  severity: critical\ndeny-list:\n  severity: [info, low]\n")
            .env_source(MapEnv::new())
            .load()
            .unwrap();

        assert_eq!(config.filters.allow.as_slice(), &[Severity::Critical]);
        assert_eq!(config.filters.deny.as_slice(), &[Severity::Info, Severity::Low]);
    }

    #[test]
    fn test_file_not_found() {
        let result = ConfigLoader::new()
            .file("/nonexistent/vigil/reporting.yaml")
            .load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/reporting.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("reporting.ini")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }
}
