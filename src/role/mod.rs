// ABOUTME: Role module - role definitions, the loaded role table and its handle.
// ABOUTME: Tables are immutable; reloads swap a whole table at once.

mod definition;
mod handle;
mod loader;

pub use definition::*;
pub use handle::*;
pub use loader::*;
