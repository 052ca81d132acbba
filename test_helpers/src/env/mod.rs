//! Serialised access to the process environment for tests.
//!
//! The loaders read configuration straight from the process environment, so
//! tests that set variables must not interleave. Every mutation here takes a
//! global re-entrant mutex and returns an [`EnvVarGuard`] that restores the
//! previous value (or removes the variable) when dropped.
//!
//! Tests that populate a record should hold an [`EnvScope`] for their whole
//! body: it keeps the lock while the record is read and restores every
//! variable on drop.
//!
//! # Examples
//!
//! ```
//! use tagged_config_test_helpers::env;
//!
//! let _scope = env::scope([
//!     ("HELPER_DOC_PORT", Some("8080")),
//!     ("HELPER_DOC_DEBUG", None),
//! ]);
//! assert_eq!(std::env::var("HELPER_DOC_PORT").as_deref(), Ok("8080"));
//! assert!(std::env::var("HELPER_DOC_DEBUG").is_err());
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Applies one mutation while the lock is held and records the prior value.
fn mutate(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    // SAFETY: `ENV_MUTEX` serialises every mutation made through this module.
    unsafe {
        match value {
            Some(value) => env::set_var(&key, value),
            None => env::remove_var(&key),
        }
    }
    EnvVarGuard { key, original }
}

/// Restores an environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Variable managed by this guard.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        // SAFETY: `ENV_MUTEX` is held during restoration.
        unsafe {
            match self.original.take() {
                Some(value) => env::set_var(&self.key, value),
                None => env::remove_var(&self.key),
            }
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

/// Sets `key` to `value` until the guard is dropped.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), Some(value.as_ref()))
}

/// Removes `key` until the guard is dropped.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    mutate(key.into(), None)
}

/// Holds the environment lock and a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Sets or removes another variable inside the scope.
    pub fn set(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.guards.push(mutate(key.into(), value.map(OsStr::new)));
    }

    /// Adopts a variable that code under test may create, such as one loaded
    /// from an env file, so that it is removed again when the scope ends.
    pub fn adopt(&mut self, key: impl Into<String>) {
        let key = key.into();
        let original = env::var_os(&key);
        self.guards.push(EnvVarGuard { key, original });
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // LIFO so stacked guards for one key unwind to the first original.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Locks the environment and applies each `(key, value)` pair; `None`
/// removes the variable.
pub fn scope<'a, I>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let lock = ENV_MUTEX.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| mutate(key.to_owned(), value.map(OsStr::new)))
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

/// Runs `f` while holding the environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}

#[cfg(test)]
mod tests;
