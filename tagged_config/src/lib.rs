//! Populate configuration records from INI files or environment variables.
//!
//! A record is a struct deriving [`TaggedConfig`]. Each field names its
//! lookup key per source through `#[tagged(...)]` annotations:
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//! use tagged_config::{LoadOptions, TaggedConfig, initialize_config};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, TaggedConfig)]
//! struct Server {
//!     #[tagged(env = "PORT", docker = "PORT")]
//!     port: u16,
//!     #[tagged(env = "DEBUG", docker = "DEBUG")]
//!     debug: bool,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize, TaggedConfig)]
//! struct AppConfig {
//!     #[tagged(env = "APP_NAME", docker = "NAME")]
//!     name: String,
//!     #[tagged(env = "SERVER", docker = "SERVER")]
//!     server: Server,
//! }
//!
//! # fn main() -> Result<(), tagged_config::TaggedError> {
//! let mut config = AppConfig::default();
//! initialize_config(&mut config, &LoadOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Sources
//!
//! Exactly one source is used per call:
//!
//! - **ini**: `config.ini` is mapped onto the record by the `config` crate.
//!   Sections become nested records; annotations are not consulted.
//! - **env**: `.env` is loaded into the process environment, then every
//!   field is read from the variable named by its `env` annotation.
//! - **docker**: every field is read from the variable named by its
//!   `docker` annotation.
//!
//! Without an explicit [`Mode`], `DOCKER=true` selects docker; otherwise an
//! existing `.env` selects env and an existing `config.ini` selects ini. See
//! [`Precedence`] for the alternatives.
//!
//! # Keys and nesting
//!
//! Nested records compose keys top-down: with `SERVER` on the `server` field
//! and `PORT` on `Server::port`, the port is read from `SERVER_PORT`. A
//! nested field without an annotation adds nothing to the prefix.
//!
//! # Coercion
//!
//! `String` fields take the raw value (absent reads as empty). Integer
//! fields fail fast on anything that is not a base-10 integer, including an
//! absent value. Boolean fields accept `1 t T TRUE true True` and
//! `0 f F FALSE false False`; anything else becomes `false` under the default
//! [`BoolPolicy::Lenient`], or an error under [`BoolPolicy::Strict`].

pub use tagged_config_macros::TaggedConfig;

mod coerce;
mod error;
mod ini;
mod loader;
mod mode;
mod populate;
mod schema;
mod source;

pub use coerce::{BoolPolicy, ParseBoolError, parse_bool};
pub use error::{TaggedError, TaggedResult};
pub use loader::{
    DEFAULT_DOCKER_VAR, DEFAULT_ENV_PATH, DEFAULT_INI_PATH, LoadOptions, initialize_config,
    initialize_docker_config, initialize_environment_config, initialize_ini_config,
};
pub use mode::{Detection, Mode, Precedence};
pub use populate::{Populator, compose_key};
pub use schema::{Annotation, Field, RecordSlot, Slot, Tag, TaggedConfig};
pub use source::{ProcessEnv, Source};
