//! Test utilities
//!
//! In-memory port implementations and test fixtures for unit testing.
//!
//! Why hand-written mocks instead of mockall?
//! - The reservation port hands out a transaction by value, which mockall
//!   expectations cannot model with real lock semantics
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
