//! Severity levels and ordered severity sets.
//!
//! Severities are normalised at decode time: surrounding whitespace is
//! trimmed and case is ignored, so `" High"`, `"high"` and `"HIGH"` all
//! decode to [`Severity::High`].
//!
//! A [`SeveritySet`] accepts either a comma separated string or a sequence
//! in the source document:
//!
//! ```yaml
//! allow-list:
//!   severity: high, critical
//! deny-list:
//!   severity:
//!     - low
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SeverityError, SeverityResult};

/// Severity of a finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational finding.
    Info,
    /// Low severity.
    Low,
    /// Medium severity.
    Medium,
    /// High severity.
    High,
    /// Critical severity.
    Critical,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 5] = [
        Self::Info,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    /// Returns the canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SeverityError;

    fn from_str(s: &str) -> SeverityResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str() == normalized)
            .ok_or_else(|| SeverityError::Unknown(s.trim().to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Ordered, duplicate-free set of severities.
///
/// Declaration order from the source document is preserved. Inserting a
/// severity that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SeveritySet {
    items: Vec<Severity>,
}

impl SeveritySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a severity, returning `false` if it was already present.
    pub fn insert(&mut self, severity: Severity) -> bool {
        if self.items.contains(&severity) {
            return false;
        }
        self.items.push(severity);
        true
    }

    /// Returns true if the set contains `severity`.
    pub fn contains(&self, severity: Severity) -> bool {
        self.items.contains(&severity)
    }

    /// Iterates the severities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Severity> + '_ {
        self.items.iter().copied()
    }

    /// Number of severities in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds no severities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrows the severities as a slice.
    pub fn as_slice(&self) -> &[Severity] {
        &self.items
    }

    /// Parses a comma separated list and appends each entry.
    fn extend_from_list(&mut self, list: &str) -> SeverityResult<()> {
        for part in list.split(',') {
            if part.trim().is_empty() {
                return Err(SeverityError::EmptyEntry(list.to_string()));
            }
            self.insert(part.parse()?);
        }
        Ok(())
    }
}

impl FromIterator<Severity> for SeveritySet {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        let mut set = Self::new();
        for severity in iter {
            set.insert(severity);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SeveritySet {
    type Item = Severity;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Severity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

impl FromStr for SeveritySet {
    type Err = SeverityError;

    fn from_str(s: &str) -> SeverityResult<Self> {
        let mut set = Self::new();
        if !s.trim().is_empty() {
            set.extend_from_list(s)?;
        }
        Ok(set)
    }
}

impl fmt::Display for SeveritySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.items.iter().map(Severity::as_str).collect();
        f.write_str(&names.join(","))
    }
}

impl Serialize for SeveritySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de> Deserialize<'de> for SeveritySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeveritySetVisitor)
    }
}

struct SeveritySetVisitor;

impl<'de> Visitor<'de> for SeveritySetVisitor {
    type Value = SeveritySet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a comma separated severity string or a list of severities")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SeveritySet::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SeveritySet::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut set = SeveritySet::new();
        while let Some(entry) = seq.next_element::<String>()? {
            set.extend_from_list(&entry).map_err(de::Error::custom)?;
        }
        Ok(set)
    }
}
