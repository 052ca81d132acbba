//! Running loader tests inside a [`figment::Jail`].
//!
//! The loaders resolve `config.ini` and `.env` against the working
//! directory. A jail gives each test its own temporary directory as the
//! working directory and restores the original directory and any variables
//! set through [`figment::Jail::set_env`] afterwards.

use anyhow::{Result, anyhow};

/// Executes `f` inside a jail and returns its output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`] so library
/// errors can be propagated out of a jail closure with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a `map_err` adaptor on owned errors"
)]
pub fn jail_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
