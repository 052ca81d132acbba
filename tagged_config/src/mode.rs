//! Source modes and automatic mode selection.

use std::fmt;
use std::str::FromStr;

use crate::coerce::is_truthy_hint;
use crate::error::TaggedError;
use crate::schema::Tag;

/// Backing source used for one population pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Map an INI file onto the record.
    Ini,
    /// Load the env file, then read `env` annotations from the environment.
    Env,
    /// Read `docker` annotations from the environment.
    Docker,
}

impl Mode {
    /// Mode name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ini => "ini",
            Self::Env => "env",
            Self::Docker => "docker",
        }
    }

    /// Annotation consulted by the populator, or `None` for [`Mode::Ini`],
    /// which delegates to the INI mapper.
    #[must_use]
    pub const fn tag(self) -> Option<Tag> {
        match self {
            Self::Ini => None,
            Self::Env => Some(Tag::ENV),
            Self::Docker => Some(Tag::DOCKER),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TaggedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ini" => Ok(Self::Ini),
            "env" => Ok(Self::Env),
            "docker" => Ok(Self::Docker),
            other => Err(TaggedError::InvalidMode {
                mode: other.to_owned(),
            }),
        }
    }
}

/// Order in which detection checks decide the mode.
///
/// Three checks exist: the docker hint variable, INI file presence and env
/// file presence, evaluated in that order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// A truthy docker hint wins outright; otherwise the later file check
    /// wins, so an env file beats an INI file.
    #[default]
    DockerFirst,
    /// The first positive check wins: docker, then INI, then env.
    FirstMatch,
    /// The last positive check wins: env, then INI, then docker.
    LastMatch,
}

/// Results of the environment and filesystem checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// The docker hint variable is `"true"` in any casing.
    pub docker: bool,
    /// The INI file exists.
    pub ini: bool,
    /// The env file exists.
    pub env: bool,
}

impl Detection {
    /// Builds a detection from the raw docker hint value and file presence.
    #[must_use]
    pub fn new(docker_hint: Option<&str>, ini: bool, env: bool) -> Self {
        Self {
            docker: docker_hint.is_some_and(is_truthy_hint),
            ini,
            env,
        }
    }

    /// Picks a mode under `precedence`.
    ///
    /// Falls back to [`Mode::Env`] when no check is positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_config::{Detection, Mode, Precedence};
    ///
    /// let detection = Detection::new(Some("TRUE"), true, false);
    /// assert_eq!(detection.select(Precedence::DockerFirst), Mode::Docker);
    /// assert_eq!(detection.select(Precedence::LastMatch), Mode::Ini);
    /// ```
    #[must_use]
    pub fn select(self, precedence: Precedence) -> Mode {
        let checks = [
            (Mode::Docker, self.docker),
            (Mode::Ini, self.ini),
            (Mode::Env, self.env),
        ];
        let mut positive = checks.iter().filter(|(_, hit)| *hit).map(|(mode, _)| *mode);
        let chosen = match precedence {
            Precedence::FirstMatch => positive.next(),
            Precedence::LastMatch => positive.last(),
            Precedence::DockerFirst if self.docker => Some(Mode::Docker),
            Precedence::DockerFirst => positive.last(),
        };
        chosen.unwrap_or(Mode::Env)
    }
}
