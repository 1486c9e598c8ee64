// ABOUTME: Transform module - JSON presenters with policy-driven field visibility.
// ABOUTME: Private fields are only emitted for owners and managers.

mod presenter;

pub use presenter::*;
