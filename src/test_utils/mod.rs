//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - An in-memory `CircleRepo` for mocking persistence
//! - A builder for an `AppState` wired to those mocks

mod app_state_builder;
mod circle_mocks;
mod factories;

pub use app_state_builder::*;
pub use circle_mocks::*;
pub use factories::*;
