//! Procedural macros for `tagged_config`.
//!
//! `#[derive(TaggedConfig)]` turns a struct with named fields into a record
//! schema: one `Field` per struct field, carrying its `#[tagged(...)]`
//! annotations and function-pointer slots that assign into it. The schema is
//! emitted as a `const` item so no work happens at runtime beyond the
//! population itself.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `tagged_config::TaggedConfig`.
///
/// Field attributes:
/// - `env = "KEY"`, `docker = "KEY"`, or any `name = "KEY"` declares the
///   lookup key for that annotation name;
/// - a bare name such as `env` derives the key from the field name in
///   `SCREAMING_SNAKE_CASE`;
/// - `skip` leaves the field untouched;
/// - `kind = "string" | "integer" | "boolean" | "nested"` overrides the
///   classification of the field's type.
///
/// Struct attribute `crate = "path"` changes the path used to reach the
/// `tagged_config` crate.
#[proc_macro_derive(TaggedConfig, attributes(tagged))]
pub fn derive_tagged_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
