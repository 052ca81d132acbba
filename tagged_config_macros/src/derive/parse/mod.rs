//! Parsing of `#[tagged(...)]` attributes for the `TaggedConfig` derive.

use heck::ToShoutySnakeCase;
use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;

pub(crate) use input::parse_input;
use literals::lit_str;

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[tagged(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `tagged_config::`.
    pub crate_path: Option<syn::Path>,
}

/// One `tag = "KEY"` pair declared on a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AnnotationAttr {
    pub tag: String,
    pub key: String,
}

/// Explicit classification requested with `kind = "..."`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KindOverride {
    String,
    Integer,
    Boolean,
    Nested,
}

impl KindOverride {
    pub(crate) fn parse(s: &str, span: Span) -> Result<Self, syn::Error> {
        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "nested" => Ok(Self::Nested),
            _ => Err(syn::Error::new(
                span,
                format!(
                    "unknown kind '{s}'; expected one of \"string\", \"integer\", \"boolean\", or \"nested\""
                ),
            )),
        }
    }
}

/// Field-level attributes recognised by `#[derive(TaggedConfig)]`.
///
/// - `skip` leaves the field out of population.
/// - `kind` overrides type classification.
/// - every other key is an annotation; a bare key derives its value from
///   the field name.
#[derive(Default, Clone, Debug)]
pub(crate) struct FieldAttrs {
    pub annotations: Vec<AnnotationAttr>,
    pub skip: bool,
    pub kind: Option<KindOverride>,
}

/// Iterate all `#[tagged(...)]` attributes once and apply a callback.
fn parse_tagged<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("tagged")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[tagged(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised. Unknown keys are ignored so callers keep
/// compiling when new struct attributes appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_tagged(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[tagged(...)]` attributes.
///
/// Annotation names must be unique per field. `skip` and `kind` are reserved
/// and cannot be used as annotation names.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_tagged(&field.attrs, |meta| {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected an annotation name such as `env` or `docker`"));
        };
        let name = ident.to_string();
        match name.as_str() {
            "skip" => {
                out.skip = true;
                Ok(())
            }
            "kind" => {
                let s = lit_str(meta, "kind")?;
                out.kind = Some(KindOverride::parse(&s.value(), s.span())?);
                Ok(())
            }
            _ => {
                if out.annotations.iter().any(|a| a.tag == name) {
                    return Err(meta.error(format!("duplicate `{name}` annotation")));
                }
                let key = if meta.input.peek(Token![=]) {
                    lit_str(meta, &name)?.value()
                } else {
                    default_key(field)
                };
                out.annotations.push(AnnotationAttr { tag: name, key });
                Ok(())
            }
        }
    })?;
    Ok(out)
}

/// Derives a lookup key from the field name: `max_conns` becomes `MAX_CONNS`.
fn default_key(field: &syn::Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| field_name(ident).to_shouty_snake_case())
        .unwrap_or_default()
}

/// Field name without a raw-identifier prefix.
pub(crate) fn field_name(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_owned).unwrap_or(name)
}
