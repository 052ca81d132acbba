//! Input parsing for the `TaggedConfig` derive macro.
//!
//! This module gathers the struct identifier, fields, and attribute metadata
//! in one pass so expansion can fail fast on shapes that cannot be records.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Everything expansion needs from the user's struct.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub fields: Vec<syn::Field>,
    pub struct_attrs: StructAttrs,
    pub field_attrs: Vec<FieldAttrs>,
}

/// Gathers information from the user-provided struct.
///
/// Only non-generic structs with named fields are records. Enums, unions,
/// tuple and unit structs are rejected here; generic parameters are rejected
/// because the schema is a `const` item tied to one concrete type.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    let ident = input.ident.clone();
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "TaggedConfig requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "TaggedConfig can only be derived for structs",
            ));
        }
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "TaggedConfig cannot be derived for generic structs",
        ));
    }

    let field_attrs = fields
        .iter()
        .map(parse_field_attrs)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParsedInput {
        ident,
        fields,
        struct_attrs,
        field_attrs,
    })
}
