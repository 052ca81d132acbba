//! Error types produced while selecting a source and populating a record.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type TaggedResult<T> = Result<T, TaggedError>;

/// Errors that can occur while populating configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaggedError {
    /// A configuration file was missing or could not be read.
    #[error("failed to read configuration source '{path}': {source}")]
    UnreadableSource {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was read but its contents were rejected.
    #[error("configuration source '{path}' is malformed: {source}")]
    MalformedSource {
        /// File whose contents were rejected.
        path: PathBuf,
        /// Error reported by the INI mapper or the dotenv loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A mode string did not name a known source.
    #[error("invalid config mode '{mode}'; expected one of \"ini\", \"env\", or \"docker\"")]
    InvalidMode {
        /// The rejected mode string.
        mode: String,
    },

    /// The record declares a field type the populator cannot assign.
    #[error("unsupported field type `{type_name}` for field `{field}`")]
    UnsupportedFieldType {
        /// Dotted path of the offending field.
        field: String,
        /// Declared type of the field.
        type_name: &'static str,
    },

    /// A raw value could not be converted into the field's type.
    #[error("failed to convert '{value}' to {expected} for field `{field}` (key `{key}`): {reason}")]
    TypeCoercion {
        /// Dotted path of the offending field.
        field: String,
        /// Lookup key that produced the value.
        key: String,
        /// Raw value as read from the source.
        value: String,
        /// Name of the target type family.
        expected: &'static str,
        /// Parser message.
        reason: String,
    },
}

impl TaggedError {
    /// Prefixes the field path of a nested failure with its parent field.
    ///
    /// Errors without a field path are returned unchanged.
    #[must_use]
    pub fn within(self, parent: &str) -> Self {
        match self {
            Self::UnsupportedFieldType { field, type_name } => Self::UnsupportedFieldType {
                field: join_path(parent, &field),
                type_name,
            },
            Self::TypeCoercion {
                field,
                key,
                value,
                expected,
                reason,
            } => Self::TypeCoercion {
                field: join_path(parent, &field),
                key,
                value,
                expected,
                reason,
            },
            other => other,
        }
    }

    /// Dotted path of the field that failed, when the error concerns one.
    #[must_use]
    pub fn field_path(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFieldType { field, .. } | Self::TypeCoercion { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::MalformedSource {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

fn join_path(parent: &str, child: &str) -> String {
    format!("{parent}.{child}")
}
