//! `#[derive(ResolveEnv)]` implementation.
//!
//! The generated impl calls `EnvResolver::visit_field` once per field:
//!
//! ```rust,ignore
//! impl ::vigil_core::env::ResolveEnv for GitHubOptions {
//!     fn resolve_env(&mut self, resolver: &mut ::vigil_core::env::EnvResolver<'_>) {
//!         resolver.visit_field("username", &mut self.username);
//!         resolver.visit_field("token", &mut self.token);
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Index, LitStr, spanned::Spanned};

/// Per-field `#[env(…)]` markers.
#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

pub fn derive_resolve_env(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    // Every type parameter may reach a visited field.
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param
            .bounds
            .push(syn::parse_quote!(::vigil_core::env::ResolveEnv));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new(
                input.span(),
                "ResolveEnv cannot be derived for enums",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "ResolveEnv cannot be derived for unions",
            ));
        }
    };

    let mut visits = generate_visits(fields)?;
    if visits.is_empty() {
        visits.push(quote!(let _ = resolver;));
    }

    Ok(quote! {
        impl #impl_generics ::vigil_core::env::ResolveEnv for #name #ty_generics #where_clause {
            fn resolve_env(&mut self, resolver: &mut ::vigil_core::env::EnvResolver<'_>) {
                #(#visits)*
            }
        }
    })
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("env") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                result.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                result.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("unknown env attribute, expected `skip` or `rename = \"…\"`"))
            }
        })?;
    }

    Ok(result)
}

fn generate_visits(fields: &Fields) -> syn::Result<Vec<TokenStream>> {
    let mut visits = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let (member, default_name) = match &field.ident {
            Some(ident) => (quote!(#ident), ident.to_string()),
            None => {
                let idx = Index::from(index);
                (quote!(#idx), index.to_string())
            }
        };
        let segment = attrs.rename.unwrap_or(default_name);
        let segment = segment.strip_prefix("r#").unwrap_or(&segment).to_string();

        visits.push(quote! {
            resolver.visit_field(#segment, &mut self.#member);
        });
    }

    Ok(visits)
}
