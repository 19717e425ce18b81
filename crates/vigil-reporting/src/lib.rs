//! Vigil Reporting - configuration loading for the reporting subsystem.
//!
//! This crate provides:
//! - The reporting options schema and its validation
//! - [`ConfigLoader`], which decodes, validates and resolves `$NAME`
//!   environment references in one pass
//! - [`build_filters`], deriving the allow/deny severity sets
//! - Logging configuration
//!
//! ```ignore
//! use vigil_reporting::{ConfigLoader, Severity};
//!
//! let config = ConfigLoader::new().file("reporting-config.yaml").load()?;
//! for token in &config.report.unresolved {
//!     eprintln!("{} still references ${}", token.path, token.name);
//! }
//! assert!(config.filters.permits(Severity::Critical));
//! ```

pub mod config;
pub mod filters;
pub mod logging;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, Filter, GitHubOptions, GitLabOptions, JiraOptions,
    ReportingConfig, ReportingOptions, decode_and_validate, load_reporting_options,
};
pub use filters::{SeverityFilters, build_filters};
pub use logging::{LogFormat, LogOutput, LoggingBuilder};
pub use vigil_core::{Severity, SeveritySet};

// Re-export tracing for use by other crates
pub use tracing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{debug, error, info, trace, warn};
}
