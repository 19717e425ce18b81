//! Configuration module for Vigil reporting.
//!
//! This module provides YAML-based decoding and validation of the reporting
//! options, followed by environment reference resolution.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    ConfigFormat, ConfigLoader, ReportingConfig, decode_and_validate, load_reporting_options,
};
pub use schema::{Filter, GitHubOptions, GitLabOptions, JiraOptions, ReportingOptions};
pub use validation::validate_options;
