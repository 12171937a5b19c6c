//! Test doubles for code built on [`crate::GraphQuery`]
//!
//! Available to this crate's tests and, with the `test-utils` feature, to
//! downstream crates.

pub mod mocks;

pub use mocks::{EngineCall, MockGraphEngine};
