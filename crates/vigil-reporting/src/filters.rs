//! Allow/deny severity filters.
//!
//! The filters are taken as decoded; normalisation of case and list syntax
//! already happened when the [`SeveritySet`]s were parsed.

use serde::Serialize;
use tracing::{debug, warn};
use vigil_core::{Severity, SeveritySet};

use crate::config::ReportingOptions;

/// Severity gates for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityFilters {
    /// Severities that may be reported. Empty allows every severity.
    pub allow: SeveritySet,
    /// Severities that are never reported.
    pub deny: SeveritySet,
}

impl SeverityFilters {
    /// Returns true if a finding of `severity` should be reported.
    ///
    /// The deny list wins over the allow list.
    pub fn permits(&self, severity: Severity) -> bool {
        if self.deny.contains(severity) {
            return false;
        }
        self.allow.is_empty() || self.allow.contains(severity)
    }
}

/// Derives the allow and deny sets from decoded options.
///
/// An absent list yields an empty set. Declaration order is preserved.
pub fn build_filters(options: &ReportingOptions) -> SeverityFilters {
    let allow = options
        .allow_list
        .as_ref()
        .map(|f| f.severity.clone())
        .unwrap_or_default();
    let deny = options
        .deny_list
        .as_ref()
        .map(|f| f.severity.clone())
        .unwrap_or_default();

    for severity in allow.iter().filter(|s| deny.contains(*s)) {
        warn!(%severity, "Severity is both allowed and denied, deny takes precedence");
    }
    debug!(%allow, %deny, "Severity filters built");

    SeverityFilters { allow, deny }
}
