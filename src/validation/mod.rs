// ABOUTME: Validation module - typed rule sets for request payloads.
// ABOUTME: Failures are reported as a list of field-level errors.

mod rules;

pub use rules::*;
