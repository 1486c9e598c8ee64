// ABOUTME: Root module for rolegate - role and permission authorization.
// ABOUTME: Re-exports the public types from each submodule.

pub mod authz;
pub mod config;
pub mod error;
pub mod permission;
pub mod policy;
pub mod prelude;
pub mod principal;
pub mod role;
pub mod telemetry;
pub mod transform;
pub mod validation;

pub use error::RolegateError;
