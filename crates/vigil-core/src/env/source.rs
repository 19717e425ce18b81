//! Read-only environment lookups.

use std::collections::HashMap;
use std::env::VarError;

use tracing::warn;

/// A read-only view of environment variables.
///
/// The resolver never writes through this trait. Tests inject a [`MapEnv`]
/// so they do not depend on the shared process environment.
pub trait EnvSource {
    /// Returns the value of `name`, or `None` if it is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
///
/// Every lookup reads the live environment, so a variable set after the
/// configuration was decoded is still picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(name, "Environment variable is not valid UTF-8, treating as unset");
                None
            }
        }
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Removes a variable.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_lookup() {
        let mut env = MapEnv::new().with("A", "1").with("EMPTY", "");
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("EMPTY").as_deref(), Some(""));
        assert_eq!(env.var("B"), None);

        env.remove("A");
        assert_eq!(env.var("A"), None);
    }

    #[test]
    fn test_closure_source() {
        let source = |name: &str| (name == "X").then(|| "x".to_string());
        assert_eq!(source.var("X").as_deref(), Some("x"));
        assert_eq!(source.var("Y"), None);
    }

    #[test]
    fn test_process_env_reads_live_value() {
        let name = "VIGIL_CORE_PROCESS_ENV_TEST_7F3A";
        assert_eq!(ProcessEnv.var(name), None);
        // SAFETY: This variable name is unique to this test
        unsafe {
            std::env::set_var(name, "live");
        }
        assert_eq!(ProcessEnv.var(name).as_deref(), Some("live"));
        unsafe {
            std::env::remove_var(name);
        }
    }
}
