// ABOUTME: Authorization module - the capability check over the role table.
// ABOUTME: Deny by default; direct denials win over every allow.

mod checker;

pub use checker::*;

#[cfg(test)]
mod checker_test;
