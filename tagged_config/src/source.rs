//! Key/value sources consulted by the populator.
//!
//! A [`Source`] is a read-only lookup from a key to an optional string. The
//! loaders use [`ProcessEnv`]; maps are handy for embedding and tests.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only string lookup used during a single population pass.
pub trait Source {
    /// Returns the raw value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
///
/// Values that are not valid Unicode are read lossily, with U+FFFD in place
/// of the invalid bytes, so a set variable is never mistaken for an absent
/// one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: Source + ?Sized> Source for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
