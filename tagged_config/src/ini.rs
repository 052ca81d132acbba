//! INI-backed population.
//!
//! The INI format and its mapping onto the record belong to the `config`
//! crate: sections map to nested records, keys to fields, and string values
//! are converted to the field types during deserialisation. The current
//! record is serialised as the base layer, so keys missing from the file
//! keep their existing values.
//!
//! `config` stores integers above `i64::MAX` and 128-bit integers, but its
//! own serialiser and deserialiser reject them. The base layer is therefore
//! built from the record's JSON form, and the layered tree is read back
//! through a wrapper deserialiser that adds the 128-bit cases.

use std::path::Path;

use config::{Config, ConfigError, File, FileFormat, Map, Source, Value, ValueKind};
use serde::Serialize;
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{DeserializeOwned, Deserializer, IntoDeserializer, Visitor};

use crate::error::{TaggedError, TaggedResult};

/// Reads `path` and maps its INI contents onto `record`.
pub(crate) fn load_file<T>(record: &mut T, path: &Path) -> TaggedResult<()>
where
    T: Serialize + DeserializeOwned,
{
    let text = std::fs::read_to_string(path).map_err(|err| TaggedError::unreadable(path, err))?;
    *record = map_str(record, &text).map_err(|err| TaggedError::malformed(path, err))?;
    Ok(())
}

/// Layers the INI document `text` over the serialised `base`.
fn map_str<T>(base: &T, text: &str) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned,
{
    let mut builder = Config::builder();
    // A record JSON cannot hold is mapped from the file alone.
    if let Some(seed) = Seed::of(base) {
        builder = builder.add_source(seed);
    }
    let layered = builder
        .add_source(File::from_str(text, FileFormat::Ini))
        .build()?
        .collect()?;
    T::deserialize(Layered(Value::new(None, ValueKind::Table(layered))))
}

/// The current record as a `config` source.
#[derive(Debug, Clone)]
struct Seed(Map<String, Value>);

impl Seed {
    fn of<T: Serialize>(base: &T) -> Option<Self> {
        let json = serde_json::to_value(base).ok()?;
        tree(json).into_table().ok().map(Self)
    }
}

impl Source for Seed {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self.0.clone())
    }
}

fn tree(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;

    let kind = match json {
        Json::Null => ValueKind::Nil,
        Json::Bool(flag) => ValueKind::Boolean(flag),
        Json::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                ValueKind::U64(unsigned)
            } else if let Some(signed) = number.as_i64() {
                ValueKind::I64(signed)
            } else {
                ValueKind::Float(number.as_f64().unwrap_or_default())
            }
        }
        Json::String(text) => ValueKind::String(text),
        Json::Array(items) => ValueKind::Array(items.into_iter().map(tree).collect()),
        Json::Object(entries) => ValueKind::Table(
            entries
                .into_iter()
                .map(|(key, value)| (key, tree(value)))
                .collect(),
        ),
    };
    Value::new(None, kind)
}

/// Reads a layered tree, with `u128` and `i128` support on top of
/// `config::Value`'s own deserialiser.
struct Layered(Value);

impl<'de> IntoDeserializer<'de, ConfigError> for Layered {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

macro_rules! forward_to_value {
    ($($method:ident)*) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
            self.0.$method(visitor)
        }
    )*};
}

impl<'de> Deserializer<'de> for Layered {
    type Error = ConfigError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        match self.0.kind {
            ValueKind::Table(_) => self.deserialize_map(visitor),
            ValueKind::Array(_) => self.deserialize_seq(visitor),
            _ => self.0.deserialize_any(visitor),
        }
    }

    fn deserialize_i128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_i128(self.0.into_int128()?)
    }

    fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        visitor.visit_u128(self.0.into_uint128()?)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        if matches!(self.0.kind, ValueKind::Nil) {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ConfigError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        let items = self.0.into_array()?;
        let mut access: SeqDeserializer<_, ConfigError> =
            SeqDeserializer::new(items.into_iter().map(Layered));
        let value = visitor.visit_seq(&mut access)?;
        access.end()?;
        Ok(value)
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, ConfigError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, ConfigError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ConfigError> {
        let table = self.0.into_table()?;
        let mut access: MapDeserializer<'de, _, ConfigError> = MapDeserializer::new(
            table
                .into_iter()
                .map(|(key, value)| (key, Layered(value))),
        );
        let value = visitor.visit_map(&mut access)?;
        access.end()?;
        Ok(value)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ConfigError> {
        self.deserialize_map(visitor)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ConfigError> {
        self.0.deserialize_unit_struct(name, visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, ConfigError> {
        self.0.deserialize_enum(name, variants, visitor)
    }

    forward_to_value! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_f32 deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_unit
        deserialize_identifier deserialize_ignored_any
    }
}
