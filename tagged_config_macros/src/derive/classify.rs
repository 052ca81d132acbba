//! Field type classification.
//!
//! Inspection is shallow and looks only at the final path segment, so
//! `String`, `std::string::String` and `alloc::string::String` classify
//! alike. Any other path type is assumed to be a nested record; if it does
//! not implement `TaggedConfig` the generated code fails to compile at the
//! field's type.

use quote::ToTokens;
use syn::Type;

use super::parse::KindOverride;

/// How a field is assigned during population.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    String,
    Boolean,
    Integer,
    Nested,
    Unsupported(String),
}

const INTEGERS: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

const UNSUPPORTED: &[&str] = &[
    "f32", "f64", "char", "str", "Option", "Vec", "VecDeque", "HashMap", "BTreeMap", "HashSet",
    "BTreeSet", "Box", "Rc", "Arc", "Cow", "Cell", "RefCell", "PathBuf", "OsString", "Duration",
];

/// Classifies `ty`, honouring an explicit `kind` override.
pub(crate) fn classify(ty: &Type, kind: Option<KindOverride>) -> FieldKind {
    match kind {
        Some(KindOverride::String) => FieldKind::String,
        Some(KindOverride::Integer) => FieldKind::Integer,
        Some(KindOverride::Boolean) => FieldKind::Boolean,
        Some(KindOverride::Nested) => FieldKind::Nested,
        None => classify_type(ty),
    }
}

fn classify_type(ty: &Type) -> FieldKind {
    match ty {
        Type::Group(group) => classify_type(&group.elem),
        Type::Paren(paren) => classify_type(&paren.elem),
        Type::Path(path) if path.qself.is_none() => {
            let Some(last) = path.path.segments.last() else {
                return FieldKind::Unsupported(type_name(ty));
            };
            let ident = last.ident.to_string();
            match ident.as_str() {
                "String" => FieldKind::String,
                "bool" => FieldKind::Boolean,
                name if INTEGERS.contains(&name) => FieldKind::Integer,
                name if UNSUPPORTED.contains(&name) => FieldKind::Unsupported(type_name(ty)),
                _ => FieldKind::Nested,
            }
        }
        _ => FieldKind::Unsupported(type_name(ty)),
    }
}

/// Renders `ty` the way it is usually written: `Option<u16>`, `&'static str`.
pub(crate) fn type_name(ty: &Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev_tight = out.chars().last().is_some_and(is_tight);
            let next_tight = chars.peek().copied().is_some_and(is_tight);
            if prev_tight || next_tight {
                continue;
            }
        }
        out.push(c);
    }
    out.replace(',', ", ").replace(';', "; ")
}

const fn is_tight(c: char) -> bool {
    matches!(
        c,
        '<' | '>' | '[' | ']' | '(' | ')' | ',' | ':' | '&' | '*' | ';'
    )
}
