//! Graph traversal and string substitution.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use tracing::{debug, trace};

use super::source::{EnvSource, ProcessEnv};
use crate::severity::{Severity, SeveritySet};

/// Returns the variable name if `value` is exactly one `$NAME` reference.
///
/// `NAME` is one or more ASCII letters, digits or underscores. The name is
/// returned as written; lookups are case-sensitive.
pub fn parse_env_token(value: &str) -> Option<&str> {
    let name = value.strip_prefix('$')?;
    if name.is_empty() {
        return None;
    }
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        .then_some(name)
}

/// A reference whose variable was not set when resolution ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    /// Dotted field path, e.g. `github.token`.
    pub path: String,
    /// Referenced variable name, without the leading `$`.
    pub name: String,
}

/// Outcome of a resolution pass.
///
/// Unresolved references are not errors. Consumers that cannot work with a
/// literal `$NAME` value should check [`ResolveReport::unresolved`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Paths of fields that were substituted.
    pub resolved: Vec<String>,
    /// References left in place because their variable was unset.
    pub unresolved: Vec<UnresolvedToken>,
}

impl ResolveReport {
    /// Returns true if every reference found was substituted.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Returns true if the field at `path` was left unresolved.
    pub fn is_unresolved(&self, path: &str) -> bool {
        self.unresolved.iter().any(|t| t.path == path)
    }
}

/// Visits the children of a configuration node.
///
/// Derive it with `#[derive(ResolveEnv)]`. Leaf types that can never hold a
/// reference implement it as a no-op.
pub trait ResolveEnv {
    /// Resolves every reference reachable from `self`.
    fn resolve_env(&mut self, resolver: &mut EnvResolver<'_>);
}

/// Depth-first resolution context.
///
/// Tracks the current field path for diagnostics and accumulates a
/// [`ResolveReport`]. Environment values are never logged.
pub struct EnvResolver<'a> {
    source: &'a dyn EnvSource,
    path: Vec<&'static str>,
    report: ResolveReport,
}

impl<'a> EnvResolver<'a> {
    /// Creates a resolver reading from `source`.
    pub fn new(source: &'a dyn EnvSource) -> Self {
        Self {
            source,
            path: Vec::new(),
            report: ResolveReport::default(),
        }
    }

    /// Resolves the graph rooted at `root` in place.
    pub fn resolve<T: ResolveEnv + ?Sized>(mut self, root: &mut T) -> ResolveReport {
        root.resolve_env(&mut self);
        debug!(
            resolved = self.report.resolved.len(),
            unresolved = self.report.unresolved.len(),
            "Environment references processed"
        );
        self.report
    }

    /// Descends into a named child.
    pub fn visit_field<T: ResolveEnv + ?Sized>(&mut self, name: &'static str, value: &mut T) {
        self.path.push(name);
        value.resolve_env(self);
        self.path.pop();
    }

    /// Substitutes `value` if it is a `$NAME` reference to a set variable.
    pub fn resolve_string(&mut self, value: &mut String) {
        let Some(name) = parse_env_token(value).map(str::to_owned) else {
            return;
        };
        let path = self.current_path();

        match self.source.var(&name) {
            Some(resolved) => {
                trace!(field = %path, name = %name, "Resolved environment reference");
                *value = resolved;
                self.report.resolved.push(path);
            }
            None => {
                debug!(field = %path, name = %name, "Environment variable not set, keeping reference");
                self.report.unresolved.push(UnresolvedToken { path, name });
            }
        }
    }

    /// Dotted path of the field currently being visited.
    pub fn current_path(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }
}

/// Resolves `root` against the process environment.
pub fn resolve_env<T: ResolveEnv + ?Sized>(root: &mut T) -> ResolveReport {
    resolve_env_with(root, &ProcessEnv)
}

/// Resolves `root` against `source`.
pub fn resolve_env_with<T, S>(root: &mut T, source: &S) -> ResolveReport
where
    T: ResolveEnv + ?Sized,
    S: EnvSource,
{
    EnvResolver::new(source).resolve(root)
}

// =============================================================================
// Trait implementations
// =============================================================================

impl ResolveEnv for String {
    fn resolve_env(&mut self, resolver: &mut EnvResolver<'_>) {
        resolver.resolve_string(self);
    }
}

impl<T: ResolveEnv> ResolveEnv for Option<T> {
    fn resolve_env(&mut self, resolver: &mut EnvResolver<'_>) {
        if let Some(inner) = self {
            inner.resolve_env(resolver);
        }
    }
}

impl<T: ResolveEnv + ?Sized> ResolveEnv for Box<T> {
    fn resolve_env(&mut self, resolver: &mut EnvResolver<'_>) {
        (**self).resolve_env(resolver);
    }
}

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResolveEnv for $ty {
                fn resolve_env(&mut self, _resolver: &mut EnvResolver<'_>) {}
            }
        )*
    };
}

impl_leaf!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    PathBuf, Severity, SeveritySet,
);

// Collections are not traversed; references inside them stay literal.
impl<T> ResolveEnv for Vec<T> {
    fn resolve_env(&mut self, _resolver: &mut EnvResolver<'_>) {}
}

impl<T, S> ResolveEnv for HashSet<T, S> {
    fn resolve_env(&mut self, _resolver: &mut EnvResolver<'_>) {}
}

impl<T> ResolveEnv for BTreeSet<T> {
    fn resolve_env(&mut self, _resolver: &mut EnvResolver<'_>) {}
}

impl<K, V, S> ResolveEnv for HashMap<K, V, S> {
    fn resolve_env(&mut self, _resolver: &mut EnvResolver<'_>) {}
}

impl<K, V> ResolveEnv for BTreeMap<K, V> {
    fn resolve_env(&mut self, _resolver: &mut EnvResolver<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn test_parse_env_token() {
        assert_eq!(parse_env_token("$GITHUB_USER"), Some("GITHUB_USER"));
        assert_eq!(parse_env_token("$test2"), Some("test2"));
        assert_eq!(parse_env_token("$"), None);
        assert_eq!(parse_env_token(""), None);
        assert_eq!(parse_env_token("GITHUB_USER"), None);
        assert_eq!(parse_env_token("prefix-$VAR"), None);
        assert_eq!(parse_env_token("$VAR-suffix"), None);
        assert_eq!(parse_env_token("$$VAR"), None);
        assert_eq!(parse_env_token("${VAR}"), None);
    }

    #[test]
    fn test_resolve_string_root() {
        let env = MapEnv::new().with("USER", "alice");
        let mut value = "$USER".to_string();
        let report = resolve_env_with(&mut value, &env);

        assert_eq!(value, "alice");
        assert_eq!(report.resolved, vec!["<root>".to_string()]);
    }

    #[test]
    fn test_empty_value_is_substituted() {
        let env = MapEnv::new().with("EMPTY", "");
        let mut value = "$EMPTY".to_string();
        resolve_env_with(&mut value, &env);
        assert_eq!(value, "");
    }

    #[test]
    fn test_missing_variable_keeps_token() {
        let env = MapEnv::new();
        let mut value = Some("$MISSING".to_string());
        let report = resolve_env_with(&mut value, &env);

        assert_eq!(value.as_deref(), Some("$MISSING"));
        assert_eq!(
            report.unresolved,
            vec![UnresolvedToken {
                path: "<root>".to_string(),
                name: "MISSING".to_string(),
            }]
        );
        assert!(!report.is_complete());
    }

    #[test]
    fn test_none_and_collections_are_skipped() {
        let env = MapEnv::new().with("A", "a");
        let mut absent: Option<Box<String>> = None;
        let mut list = vec!["$A".to_string()];

        assert!(resolve_env_with(&mut absent, &env).resolved.is_empty());
        assert!(resolve_env_with(&mut list, &env).resolved.is_empty());
        assert_eq!(list, vec!["$A".to_string()]);
    }

    #[test]
    fn test_boxed_value_is_resolved() {
        let env = MapEnv::new().with("A", "a");
        let mut boxed = Some(Box::new("$A".to_string()));
        resolve_env_with(&mut boxed, &env);
        assert_eq!(boxed.as_deref().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_visit_field_builds_path() {
        let env = MapEnv::new();
        let mut resolver = EnvResolver::new(&env);
        let mut value = "$NOPE".to_string();

        resolver.visit_field("github", &mut value);
        let report = resolver.resolve(&mut String::new());

        assert_eq!(report.unresolved[0].path, "github");
        assert!(report.is_unresolved("github"));
    }

    #[derive(crate::ResolveEnv)]
    struct Chain {
        value: String,
        next: Option<Box<Chain>>,
    }

    #[test]
    fn test_deep_chain() {
        let env = MapEnv::new().with("DEEP", "found");
        let mut chain = Chain {
            value: "top".to_string(),
            next: Some(Box::new(Chain {
                value: "middle".to_string(),
                next: Some(Box::new(Chain {
                    value: "$DEEP".to_string(),
                    next: None,
                })),
            })),
        };

        let report = resolve_env_with(&mut chain, &env);

        let deepest = chain.next.as_ref().and_then(|c| c.next.as_ref()).unwrap();
        assert_eq!(deepest.value, "found");
        assert_eq!(report.resolved, vec!["next.next.value"]);
    }
}
