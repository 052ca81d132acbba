//! Static description of a configuration record.
//!
//! A record type exposes its fields through [`TaggedConfig::fields`]. The
//! derive macro emits that slice as a `const` item, so the schema is built
//! once at compile time and shared by every population of the type.
//!
//! Each [`Field`] pairs the Rust field name with its annotations and a
//! [`Slot`]: a set of function pointers that know how to assign into the
//! field without runtime reflection.

use std::fmt;
use std::num::ParseIntError;

use crate::error::TaggedResult;
use crate::populate::Populator;

/// Trait implemented by configuration records.
///
/// Normally derived with `#[derive(TaggedConfig)]`:
///
/// ```rust
/// use tagged_config::TaggedConfig;
///
/// #[derive(Debug, Default, TaggedConfig)]
/// struct Server {
///     #[tagged(env = "PORT", docker = "SERVER_PORT")]
///     port: u16,
///     #[tagged(env = "DEBUG")]
///     debug: bool,
/// }
///
/// let names: Vec<_> = Server::fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["port", "debug"]);
/// ```
pub trait TaggedConfig: Sized + 'static {
    /// Returns the record's fields in declaration order.
    fn fields() -> &'static [Field<Self>];
}

/// Name of an annotation consulted during population.
///
/// The loaders use [`Tag::ENV`] and [`Tag::DOCKER`]; any other name can be
/// used with a [`Populator`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(&'static str);

impl Tag {
    /// Annotation read in `env` mode.
    pub const ENV: Self = Self("env");
    /// Annotation read in `docker` mode.
    pub const DOCKER: Self = Self("docker");

    /// Creates a tag for a custom annotation name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the annotation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A `tag = "key"` pair declared on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    tag: &'static str,
    key: &'static str,
}

impl Annotation {
    /// Creates an annotation mapping `tag` to the lookup `key`.
    #[must_use]
    pub const fn new(tag: &'static str, key: &'static str) -> Self {
        Self { tag, key }
    }

    /// Annotation name, such as `env`.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Lookup key declared for the tag.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }
}

/// Assigns a coerced nested record.
pub type RecordSlot<R> = fn(&mut R, &Populator<'_>, &str) -> TaggedResult<()>;

/// How the populator writes into a field.
///
/// Every variant holds plain function pointers so a schema can live in a
/// `const` item.
pub enum Slot<R> {
    /// A `String` field.
    Text(fn(&mut R) -> &mut String),
    /// A `bool` field.
    Flag(fn(&mut R) -> &mut bool),
    /// Any built-in integer field. The setter parses base-10 text into the
    /// field's own integer type.
    Integer(fn(&mut R, &str) -> Result<(), ParseIntError>),
    /// A nested record. The setter populates the child under the given
    /// prefix.
    Record(RecordSlot<R>),
    /// A field whose declared type cannot be populated.
    Unsupported {
        /// Declared type, as written in the record definition.
        type_name: &'static str,
    },
    /// A field the populator must leave untouched.
    Skip,
}

impl<R> Slot<R> {
    /// Short label for the slot's value type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Flag(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Record(_) => "record",
            Self::Unsupported { .. } => "unsupported",
            Self::Skip => "skipped",
        }
    }
}

impl<R> fmt::Debug for Slot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { type_name } => f
                .debug_struct("Unsupported")
                .field("type_name", type_name)
                .finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// One declared field of a record.
pub struct Field<R> {
    name: &'static str,
    annotations: &'static [Annotation],
    slot: Slot<R>,
}

impl<R> Field<R> {
    /// Describes a field.
    #[must_use]
    pub const fn new(name: &'static str, annotations: &'static [Annotation], slot: Slot<R>) -> Self {
        Self {
            name,
            annotations,
            slot,
        }
    }

    /// Rust field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All annotations declared on the field.
    #[must_use]
    pub const fn annotations(&self) -> &'static [Annotation] {
        self.annotations
    }

    /// Assignment strategy for the field's declared type.
    #[must_use]
    pub const fn slot(&self) -> &Slot<R> {
        &self.slot
    }

    /// Returns the lookup key declared for `tag`, if any.
    ///
    /// An empty key counts as no annotation.
    #[must_use]
    pub fn annotation(&self, tag: Tag) -> Option<&'static str> {
        self.annotations
            .iter()
            .find(|annotation| annotation.tag == tag.name())
            .map(Annotation::key)
            .filter(|key| !key.is_empty())
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .field("slot", &self.slot)
            .finish()
    }
}
