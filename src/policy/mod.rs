// ABOUTME: Policy module - per-resource gates built on the capability check.
// ABOUTME: Every ability is a "me" check with ownership OR an "all" check.

mod ability;
mod gate;
mod model;

pub use ability::*;
pub use gate::*;
pub use model::*;
