//! Token generation for the `TaggedConfig` impl.

use proc_macro2::TokenStream;
use quote::quote;

use super::classify::{FieldKind, classify};
use super::parse::{FieldAttrs, field_name};

/// Builds one `Field` expression for the schema slice.
pub(crate) fn field_tokens(
    krate: &TokenStream,
    record: &syn::Ident,
    field: &syn::Field,
    attrs: &FieldAttrs,
) -> syn::Result<TokenStream> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "TaggedConfig requires named fields"));
    };
    let name = field_name(ident);
    let annotations = attrs.annotations.iter().map(|annotation| {
        let tag = &annotation.tag;
        let key = &annotation.key;
        quote! { #krate::Annotation::new(#tag, #key) }
    });
    let slot = slot_tokens(krate, record, ident, &field.ty, attrs);
    Ok(quote! {
        #krate::Field::<#record>::new(
            #name,
            {
                const ANNOTATIONS: &[#krate::Annotation] = &[#( #annotations ),*];
                ANNOTATIONS
            },
            #slot,
        )
    })
}

fn slot_tokens(
    krate: &TokenStream,
    record: &syn::Ident,
    ident: &syn::Ident,
    ty: &syn::Type,
    attrs: &FieldAttrs,
) -> TokenStream {
    if attrs.skip {
        return quote! { #krate::Slot::<#record>::Skip };
    }
    match classify(ty, attrs.kind) {
        FieldKind::String => quote! {
            #krate::Slot::<#record>::Text(|record| &mut record.#ident)
        },
        FieldKind::Boolean => quote! {
            #krate::Slot::<#record>::Flag(|record| &mut record.#ident)
        },
        FieldKind::Integer => quote! {
            #krate::Slot::<#record>::Integer(|record, raw| {
                record.#ident = ::core::str::FromStr::from_str(raw)?;
                ::core::result::Result::Ok(())
            })
        },
        FieldKind::Nested => quote! {
            #krate::Slot::<#record>::Record(|record, populator, prefix| {
                populator.populate_at(&mut record.#ident, prefix)
            })
        },
        FieldKind::Unsupported(type_name) => quote! {
            #krate::Slot::<#record>::Unsupported { type_name: #type_name }
        },
    }
}

/// Wraps the schema entries in the trait impl.
pub(crate) fn impl_tokens(
    krate: &TokenStream,
    record: &syn::Ident,
    fields: &[TokenStream],
) -> TokenStream {
    quote! {
        #[automatically_derived]
        impl #krate::TaggedConfig for #record {
            fn fields() -> &'static [#krate::Field<Self>] {
                const FIELDS: &[#krate::Field<#record>] = &[#( #fields ),*];
                FIELDS
            }
        }
    }
}
