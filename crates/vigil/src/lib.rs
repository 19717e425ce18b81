//! # Vigil
//!
//! Environment-aware reporting configuration for security scanners.
//!
//! ## Overview
//!
//! Vigil loads the reporting section of a scanner configuration in one
//! linear pass:
//!
//! ```text
//! ┌───────────┐     ┌──────────────────┐     ┌─────────────┐     ┌─────────────────┐
//! │ YAML text │────▶│ decode + validate │────▶│ resolve $ENV │────▶│ allow/deny sets │
//! └───────────┘     └──────────────────┘     └─────────────┘     └─────────────────┘
//! ```
//!
//! - **Decode + validate**: typed [`ReportingOptions`], required fields checked
//! - **Resolve**: string fields holding exactly `$NAME` take the value of
//!   the environment variable `NAME` when it is set
//! - **Filters**: ordered [`SeveritySet`]s gating which findings are reported
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vigil::prelude::*;
//!
//! let config = ConfigLoader::new().file("reporting-config.yaml").load()?;
//! if config.filters.permits(Severity::High) {
//!     // file the issue
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: accept `.toml` reporting configuration files
//! - `json-log`: JSON log output

pub use vigil_core;
pub use vigil_reporting;

pub use vigil_core::env::{
    EnvResolver, EnvSource, MapEnv, ProcessEnv, resolve_env, resolve_env_with,
};
pub use vigil_core::{ResolveEnv, ResolveReport, Severity, SeverityError, SeveritySet};
pub use vigil_reporting::logging;
pub use vigil_reporting::{
    ConfigError, ConfigLoader, ConfigResult, Filter, GitHubOptions, GitLabOptions, JiraOptions,
    ReportingConfig, ReportingOptions, SeverityFilters, build_filters, decode_and_validate,
    load_reporting_options,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ConfigLoader, EnvSource, MapEnv, ReportingConfig, ReportingOptions, ResolveEnv, Severity,
        SeverityFilters, SeveritySet,
    };
    pub use vigil_reporting::prelude::*;
}
