//! The recursive populator.
//!
//! [`Populator`] walks a record's schema in declaration order, resolves each
//! field's lookup key from the active [`Tag`], fetches the raw value from a
//! [`Source`] and assigns it according to the field's [`Slot`].
//!
//! Key composition: at the root the key is the annotation itself. Inside a
//! nested record the key is `prefix + "_" + annotation`, where the prefix is
//! the composed key of the enclosing record field. A record field without an
//! annotation for the active tag passes its own prefix through unchanged.
//!
//! Failure policy:
//! - integers fail fast, leaving later fields untouched;
//! - booleans follow the configured [`BoolPolicy`];
//! - nested failures propagate immediately with the parent field name
//!   prepended to the error's field path;
//! - unsupported types fail as soon as they are reached.
//!
//! Fields assigned before a failure keep their new values.

use crate::coerce::{BoolPolicy, parse_bool};
use crate::error::{TaggedError, TaggedResult};
use crate::schema::{Field, Slot, Tag, TaggedConfig};
use crate::source::Source;

/// Fills records from a [`Source`] using one annotation [`Tag`].
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use tagged_config::{Populator, Tag, TaggedConfig};
///
/// #[derive(Debug, Default, TaggedConfig)]
/// struct Server {
///     #[tagged(env = "PORT")]
///     port: u16,
///     #[tagged(env = "DEBUG")]
///     debug: bool,
/// }
///
/// #[derive(Debug, Default, TaggedConfig)]
/// struct App {
///     #[tagged(env = "SERVER")]
///     server: Server,
/// }
///
/// let source: HashMap<String, String> = [
///     ("SERVER_PORT".to_owned(), "8080".to_owned()),
///     ("SERVER_DEBUG".to_owned(), "true".to_owned()),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut app = App::default();
/// Populator::new(&source, Tag::ENV).populate(&mut app)?;
/// assert_eq!(app.server.port, 8080);
/// assert!(app.server.debug);
/// # Ok::<(), tagged_config::TaggedError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Populator<'a> {
    source: &'a dyn Source,
    tag: Tag,
    booleans: BoolPolicy,
    debug: bool,
}

impl<'a> Populator<'a> {
    /// Creates a populator reading `tag` annotations from `source`.
    #[must_use]
    pub fn new(source: &'a dyn Source, tag: Tag) -> Self {
        Self {
            source,
            tag,
            booleans: BoolPolicy::default(),
            debug: false,
        }
    }

    /// Sets the boolean coercion policy.
    #[must_use]
    pub fn booleans(mut self, policy: BoolPolicy) -> Self {
        self.booleans = policy;
        self
    }

    /// Enables diagnostic events for every lookup and lenient fallback.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Annotation tag consulted for lookup keys.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Populates `record` starting from an empty prefix.
    ///
    /// # Errors
    ///
    /// Returns [`TaggedError::TypeCoercion`] for an unparsable integer (or a
    /// malformed boolean under [`BoolPolicy::Strict`]) and
    /// [`TaggedError::UnsupportedFieldType`] when the record declares a type
    /// the populator cannot assign.
    pub fn populate<R: TaggedConfig>(&self, record: &mut R) -> TaggedResult<()> {
        self.populate_at(record, "")
    }

    /// Populates `record`, composing every key under `prefix`.
    ///
    /// # Errors
    ///
    /// See [`Populator::populate`].
    pub fn populate_at<R: TaggedConfig>(&self, record: &mut R, prefix: &str) -> TaggedResult<()> {
        for field in R::fields() {
            self.populate_field(record, field, prefix)?;
        }
        Ok(())
    }

    fn populate_field<R>(&self, record: &mut R, field: &Field<R>, prefix: &str) -> TaggedResult<()> {
        let key = field
            .annotation(self.tag)
            .map(|annotation| compose_key(prefix, annotation));

        match field.slot() {
            Slot::Skip => Ok(()),
            Slot::Unsupported { type_name } => Err(TaggedError::UnsupportedFieldType {
                field: field.name().to_owned(),
                type_name: *type_name,
            }),
            Slot::Record(populate) => {
                let child_prefix = key.as_deref().unwrap_or(prefix);
                if self.debug {
                    tracing::info!(
                        field = field.name(),
                        prefix = child_prefix,
                        "populating nested record"
                    );
                }
                populate(record, self, child_prefix).map_err(|err| err.within(field.name()))
            }
            Slot::Text(slot) => {
                *slot(record) = self.lookup(field, key.as_deref()).unwrap_or_default();
                Ok(())
            }
            Slot::Integer(assign) => {
                let raw = self.lookup(field, key.as_deref()).unwrap_or_default();
                assign(record, &raw).map_err(|err| TaggedError::TypeCoercion {
                    field: field.name().to_owned(),
                    key: key.unwrap_or_default(),
                    value: raw,
                    expected: "integer",
                    reason: err.to_string(),
                })
            }
            Slot::Flag(slot) => {
                let raw = self.lookup(field, key.as_deref()).unwrap_or_default();
                *slot(record) = match parse_bool(&raw) {
                    Ok(value) => value,
                    Err(err) => match self.booleans {
                        BoolPolicy::Strict => {
                            return Err(TaggedError::TypeCoercion {
                                field: field.name().to_owned(),
                                key: key.unwrap_or_default(),
                                value: raw,
                                expected: "boolean",
                                reason: err.to_string(),
                            });
                        }
                        BoolPolicy::Lenient => {
                            if self.debug {
                                tracing::warn!(
                                    field = field.name(),
                                    key = key.as_deref().unwrap_or_default(),
                                    error = %err,
                                    "defaulting boolean field to false"
                                );
                            }
                            false
                        }
                    },
                };
                Ok(())
            }
        }
    }

    /// Reads the raw value for `key`; a missing key reads as absent.
    fn lookup<R>(&self, field: &Field<R>, key: Option<&str>) -> Option<String> {
        let Some(key) = key else {
            if self.debug {
                tracing::info!(
                    field = field.name(),
                    tag = %self.tag,
                    "field has no annotation for tag; treating value as absent"
                );
            }
            return None;
        };
        let value = self.source.get(key);
        if self.debug {
            tracing::info!(
                key,
                value = value.as_deref().unwrap_or_default(),
                "resolved configuration key"
            );
        }
        value
    }
}

/// Joins `prefix` and `annotation` with `_`, or returns the annotation when
/// there is no prefix.
///
/// # Examples
///
/// ```
/// use tagged_config::compose_key;
///
/// assert_eq!(compose_key("", "PORT"), "PORT");
/// assert_eq!(compose_key("SERVER", "PORT"), "SERVER_PORT");
/// ```
#[must_use]
pub fn compose_key(prefix: &str, annotation: &str) -> String {
    if prefix.is_empty() {
        annotation.to_owned()
    } else {
        format!("{prefix}_{annotation}")
    }
}

#[cfg(test)]
mod tests;
