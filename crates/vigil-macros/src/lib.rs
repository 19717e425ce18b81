//! Procedural macros for Vigil.
//!
//! This crate provides:
//!
//! - `#[derive(ResolveEnv)]` - Generates the child-visiting half of
//!   environment reference resolution for configuration structs
//!
//! # ResolveEnv Derive Macro
//!
//! ```rust,ignore
//! use vigil_core::ResolveEnv;
//!
//! #[derive(ResolveEnv)]
//! pub struct GitHubOptions {
//!     pub username: String,
//!     pub token: String,
//!     pub issue_label: Option<String>,
//!     pub severity_as_label: bool,
//!     #[env(skip)]
//!     pub client: HttpClient,
//! }
//! ```

mod resolve;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `vigil_core::env::ResolveEnv` for a struct.
///
/// Every field is visited in declaration order, so each field type must
/// implement `ResolveEnv` itself. Strings are resolved, nested structs and
/// `Option`/`Box` wrappers are descended into, and scalar or collection
/// types are left alone.
///
/// # Attributes
///
/// - `#[env(skip)]` - Do not visit this field (for types without an impl)
/// - `#[env(rename = "...")]` - Path segment used for this field in reports
///
/// Enums and unions are rejected.
#[proc_macro_derive(ResolveEnv, attributes(env))]
pub fn derive_resolve_env(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match resolve::derive_resolve_env(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
