//! Public entry points: pick a source and populate a record from it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::coerce::BoolPolicy;
use crate::error::{TaggedError, TaggedResult};
use crate::ini;
use crate::mode::{Detection, Mode, Precedence};
use crate::populate::Populator;
use crate::schema::{Tag, TaggedConfig};
use crate::source::{ProcessEnv, Source};

/// Default INI file, relative to the working directory.
pub const DEFAULT_INI_PATH: &str = "config.ini";
/// Default environment-definition file, relative to the working directory.
pub const DEFAULT_ENV_PATH: &str = ".env";
/// Variable that forces docker mode when set to `"true"`.
pub const DEFAULT_DOCKER_VAR: &str = "DOCKER";

/// Settings for [`initialize_config`].
///
/// # Examples
///
/// ```rust
/// use tagged_config::{BoolPolicy, LoadOptions, Mode};
///
/// let options = LoadOptions::new()
///     .mode(Mode::Docker)
///     .debug(true)
///     .booleans(BoolPolicy::Strict);
/// assert_eq!(options.selected_mode(), Some(Mode::Docker));
/// ```
#[derive(Debug, Clone)]
pub struct LoadOptions {
    mode: Option<Mode>,
    debug: bool,
    ini_path: PathBuf,
    env_path: PathBuf,
    booleans: BoolPolicy,
    precedence: Precedence,
    docker_var: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mode: None,
            debug: false,
            ini_path: PathBuf::from(DEFAULT_INI_PATH),
            env_path: PathBuf::from(DEFAULT_ENV_PATH),
            booleans: BoolPolicy::default(),
            precedence: Precedence::default(),
            docker_var: String::from(DEFAULT_DOCKER_VAR),
        }
    }
}

impl LoadOptions {
    /// Options with every default: automatic mode selection, `config.ini`,
    /// `.env`, lenient booleans and [`Precedence::DockerFirst`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `mode` instead of detecting one.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Enables diagnostic `tracing` events.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Overrides the INI file path.
    #[must_use]
    pub fn ini_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ini_path = path.into();
        self
    }

    /// Overrides the env file path.
    #[must_use]
    pub fn env_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_path = path.into();
        self
    }

    /// Sets how malformed booleans are handled in `env` and `docker` modes.
    #[must_use]
    pub fn booleans(mut self, policy: BoolPolicy) -> Self {
        self.booleans = policy;
        self
    }

    /// Sets the order used when detecting the mode.
    #[must_use]
    pub fn precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Renames the variable that forces docker mode.
    #[must_use]
    pub fn docker_var(mut self, name: impl Into<String>) -> Self {
        self.docker_var = name.into();
        self
    }

    /// Explicitly chosen mode, if any.
    #[must_use]
    pub const fn selected_mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Resolves the mode, probing `hints` for the docker variable and the
    /// filesystem for the INI and env files when no mode was chosen.
    #[must_use]
    pub fn resolve_mode(&self, hints: &dyn Source) -> Mode {
        if let Some(mode) = self.mode {
            return mode;
        }
        let hint = hints.get(&self.docker_var);
        let detection = Detection::new(
            hint.as_deref(),
            self.ini_path.exists(),
            self.env_path.exists(),
        );
        let mode = detection.select(self.precedence);
        if self.debug {
            tracing::info!(
                %mode,
                docker = detection.docker,
                ini = detection.ini,
                env = detection.env,
                precedence = ?self.precedence,
                "selected configuration mode"
            );
        }
        mode
    }

    fn populator<'a>(&self, source: &'a dyn Source, tag: Tag) -> Populator<'a> {
        Populator::new(source, tag)
            .booleans(self.booleans)
            .debug(self.debug)
    }
}

/// Populates `record` from the source chosen by `options`.
///
/// Without an explicit mode the source is detected from the docker hint
/// variable and the presence of the INI and env files (see [`Precedence`]).
///
/// # Errors
///
/// Returns [`TaggedError::UnreadableSource`] when the selected file cannot be
/// read, [`TaggedError::MalformedSource`] when its contents are rejected, and
/// any populator error unchanged.
pub fn initialize_config<T>(record: &mut T, options: &LoadOptions) -> TaggedResult<()>
where
    T: TaggedConfig + Serialize + DeserializeOwned,
{
    match options.resolve_mode(&ProcessEnv) {
        Mode::Ini => load_ini(record, &options.ini_path, options.debug),
        Mode::Env => {
            load_env_file(&options.env_path, options.debug)?;
            options.populator(&ProcessEnv, Tag::ENV).populate(record)
        }
        Mode::Docker => options.populator(&ProcessEnv, Tag::DOCKER).populate(record),
    }
}

/// Maps an INI file onto `record`; `path` defaults to `config.ini`.
///
/// # Errors
///
/// Returns [`TaggedError::UnreadableSource`] when the file cannot be read and
/// [`TaggedError::MalformedSource`] when it cannot be parsed or mapped.
pub fn initialize_ini_config<T>(record: &mut T, path: Option<&Path>) -> TaggedResult<()>
where
    T: Serialize + DeserializeOwned,
{
    load_ini(record, path.unwrap_or_else(|| Path::new(DEFAULT_INI_PATH)), false)
}

/// Loads an env file into the process environment, then populates `record`
/// from `env` annotations; `path` defaults to `.env`.
///
/// Variables already present in the environment are not overridden.
///
/// # Errors
///
/// Returns [`TaggedError::UnreadableSource`] when the env file cannot be
/// read, [`TaggedError::MalformedSource`] when it cannot be parsed, and any
/// populator error unchanged.
pub fn initialize_environment_config<T>(record: &mut T, path: Option<&Path>) -> TaggedResult<()>
where
    T: TaggedConfig,
{
    load_env_file(path.unwrap_or_else(|| Path::new(DEFAULT_ENV_PATH)), false)?;
    Populator::new(&ProcessEnv, Tag::ENV).populate(record)
}

/// Populates `record` from `docker` annotations in the process environment.
///
/// # Errors
///
/// Returns any populator error unchanged.
pub fn initialize_docker_config<T>(record: &mut T) -> TaggedResult<()>
where
    T: TaggedConfig,
{
    Populator::new(&ProcessEnv, Tag::DOCKER).populate(record)
}

fn load_ini<T>(record: &mut T, path: &Path, debug: bool) -> TaggedResult<()>
where
    T: Serialize + DeserializeOwned,
{
    if debug {
        tracing::info!(path = %path.display(), "mapping INI file onto record");
    }
    ini::load_file(record, path)
}

fn load_env_file(path: &Path, debug: bool) -> TaggedResult<()> {
    if debug {
        tracing::info!(path = %path.display(), "loading env file");
    }
    dotenvy::from_path(path).map_err(|err| match err {
        dotenvy::Error::Io(source) => TaggedError::unreadable(path, source),
        other => TaggedError::malformed(path, other),
    })
}
