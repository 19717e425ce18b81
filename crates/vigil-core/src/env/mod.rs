//! Environment reference resolution for configuration graphs.
//!
//! String fields whose entire value is a reference of the form `$NAME` are
//! replaced with the value of the environment variable `NAME`. Everything
//! else is left alone:
//!
//! - `"$GITHUB_TOKEN"` is a reference to `GITHUB_TOKEN`.
//! - `"prefix-$GITHUB_TOKEN"`, `"$"` and `""` are not references.
//! - A reference to an unset variable keeps its literal `$NAME` value and is
//!   recorded in the [`ResolveReport`].
//!
//! Traversal is driven by the [`ResolveEnv`] trait, usually derived:
//!
//! ```rust,ignore
//! use vigil_core::env::{MapEnv, ResolveEnv, resolve_env_with};
//!
//! #[derive(ResolveEnv)]
//! struct Tracker {
//!     username: String,
//!     token: Option<String>,
//!     #[env(skip)]
//!     retries: Vec<u32>,
//! }
//!
//! let env = MapEnv::new().with("GITHUB_USER", "alice");
//! let report = resolve_env_with(&mut tracker, &env);
//! ```
//!
//! The graph must be acyclic. Owned values (`Box`, `Option`) make that the
//! default for anything that derives the trait.

mod resolver;
mod source;

pub use resolver::{
    EnvResolver, ResolveEnv, ResolveReport, UnresolvedToken, parse_env_token, resolve_env,
    resolve_env_with,
};
pub use source::{EnvSource, MapEnv, ProcessEnv};
