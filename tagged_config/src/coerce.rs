//! Conversion of raw strings into leaf field values.

use thiserror::Error;

/// How a boolean field reacts to a value outside the boolean grammar.
///
/// Integer fields always fail fast; booleans default to [`BoolPolicy::Lenient`]
/// because flags are routinely left unset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BoolPolicy {
    /// Assign `false` and continue.
    #[default]
    Lenient,
    /// Abort population with a coercion error.
    Strict,
}

/// A value outside the accepted boolean spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
pub struct ParseBoolError {
    value: String,
}

/// Parses a boolean.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`, `F`,
/// `FALSE`, `false`, `False`. Other casings and surrounding whitespace are
/// rejected.
///
/// # Errors
///
/// Returns [`ParseBoolError`] for any other input, including the empty
/// string.
///
/// # Examples
///
/// ```
/// use tagged_config::parse_bool;
///
/// assert_eq!(parse_bool("True"), Ok(true));
/// assert_eq!(parse_bool("0"), Ok(false));
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError {
            value: raw.to_owned(),
        }),
    }
}

/// Returns `true` when `raw` is `"true"` in any ASCII casing.
///
/// Used for hint variables such as `DOCKER`, which accept a looser spelling
/// than field values.
pub(crate) fn is_truthy_hint(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}
