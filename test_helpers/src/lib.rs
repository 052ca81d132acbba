//! Test helpers shared across the `tagged_config` workspace.
//!
//! - [`env`] serialises process-environment mutations behind RAII guards.
//! - [`jail`] runs a closure inside a `figment::Jail` with its own working
//!   directory.

pub mod env;
pub mod jail;
