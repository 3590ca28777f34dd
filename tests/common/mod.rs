//! Shared test utilities for logsift integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper runs against a [`FixedClock`] so fallback
//! timestamps are deterministic.
//!
//! [`FixedClock`]: logsift::FixedClock

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
