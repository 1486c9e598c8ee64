// ABOUTME: Permission module - alias catalog and canonical permission names.
// ABOUTME: Aliases are resolved once at load time, never per request.

mod catalog;

pub use catalog::*;

#[cfg(test)]
mod catalog_test;
