//! Vigil Core - severity model and environment reference resolution.
//!
//! This crate provides:
//! - [`Severity`] and the ordered, duplicate-free [`SeveritySet`]
//! - The [`ResolveEnv`] visitor trait and its derive macro
//! - [`EnvResolver`](env::EnvResolver), which substitutes `$NAME` string
//!   fields from an injected [`EnvSource`](env::EnvSource)
//!
//! # Example
//!
//! ```rust,ignore
//! use vigil_core::ResolveEnv;
//! use vigil_core::env::{MapEnv, resolve_env_with};
//!
//! #[derive(ResolveEnv)]
//! struct Outer {
//!     name: String,
//!     inner: Option<Box<Inner>>,
//! }
//!
//! #[derive(ResolveEnv)]
//! struct Inner {
//!     token: String,
//! }
//!
//! let env = MapEnv::new().with("NAME", "vigil");
//! let report = resolve_env_with(&mut outer, &env);
//! ```

// Lets derive output (which names `::vigil_core`) compile inside this crate.
extern crate self as vigil_core;

pub mod env;
pub mod error;
pub mod severity;

pub use env::{EnvSource, ResolveEnv, ResolveReport};
pub use error::{SeverityError, SeverityResult};
pub use severity::{Severity, SeveritySet};
pub use vigil_macros::ResolveEnv;
