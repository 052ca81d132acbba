//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[tagged(crate = "...")]` attribute value into a
//! `TokenStream` that replaces hardcoded `tagged_config::` paths in generated
//! code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `tagged_config` when no override is present.
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), "tagged_config");
///
/// let path: syn::Path = syn::parse_str("cfg").unwrap();
/// assert_eq!(resolve(Some(&path)).to_string(), "cfg");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { tagged_config }, |path| quote! { #path })
}
