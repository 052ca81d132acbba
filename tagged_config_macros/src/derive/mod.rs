//! Expansion of `#[derive(TaggedConfig)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod classify;
mod crate_path;
mod generate;
mod parse;


/// Expands the derive into a `TaggedConfig` impl whose schema is a `const`
/// slice with one entry per field, in declaration order.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let fields = parsed
        .fields
        .iter()
        .zip(&parsed.field_attrs)
        .map(|(field, attrs)| generate::field_tokens(&krate, &parsed.ident, field, attrs))
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(generate::impl_tokens(&krate, &parsed.ident, &fields))
}
