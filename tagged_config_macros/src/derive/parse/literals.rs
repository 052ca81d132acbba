//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a string literal from `key = "..."`.
///
/// # Examples
///
/// ```rust,ignore
/// use syn::Attribute;
/// let attr: Attribute = syn::parse_quote!(#[tagged(env = "PORT")]);
/// attr.parse_nested_meta(|meta| {
///     let s = lit_str(&meta, "env")?;
///     assert_eq!(s.value(), "PORT");
///     Ok(())
/// }).unwrap();
/// ```
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}
