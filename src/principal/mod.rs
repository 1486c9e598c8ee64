// ABOUTME: Principal module - actors, their role assignments and direct grants.
// ABOUTME: Also defines the PrincipalStore seam and an in-memory store.

mod store;
mod types;

pub use store::*;
pub use types::*;

#[cfg(test)]
mod store_test;
