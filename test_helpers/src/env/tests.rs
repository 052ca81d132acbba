//! Unit tests for environment helpers.

use super::*;
use std::sync::{Arc, Barrier};
use std::thread;

fn value(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn set_var_restores_absent_variable() {
    let key = "HELPERS_SET_ABSENT";
    with_lock(|| {
        let guard = set_var(key, "on");
        assert_eq!(value(key).as_deref(), Some("on"));
        drop(guard);
        assert_eq!(value(key), None);
    });
}

#[test]
fn remove_var_restores_original_value() {
    let key = "HELPERS_REMOVE_ORIGINAL";
    let _outer = set_var(key, "original");
    let guard = remove_var(key);
    assert_eq!(value(key), None);
    drop(guard);
    assert_eq!(value(key).as_deref(), Some("original"));
}

#[test]
fn scope_unwinds_stacked_guards_for_one_key() {
    let key = "HELPERS_SCOPE_STACKED";
    {
        let mut scope = scope([(key, Some("first"))]);
        scope.set(key, Some("second"));
        scope.set(key, None);
        assert_eq!(value(key), None);
    }
    assert_eq!(value(key), None);
}

#[test]
fn adopted_variables_are_removed_on_drop() {
    let key = "HELPERS_SCOPE_ADOPTED";
    {
        let mut scope = scope([]);
        scope.adopt(key);
        // SAFETY: the scope holds the environment lock.
        unsafe { env::set_var(key, "loaded") };
    }
    assert_eq!(value(key), None);
}

#[test]
fn scopes_serialise_across_threads() {
    let key = "HELPERS_SCOPE_THREADS";
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for round in 0..25 {
                    let expected = format!("{worker}-{round}");
                    let _scope = scope([(key, Some(expected.as_str()))]);
                    assert_eq!(value(key).as_deref(), Some(expected.as_str()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }
    assert_eq!(value(key), None);
}
