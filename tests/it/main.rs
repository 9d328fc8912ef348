//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary, reducing linking
//! overhead.
//!
//! Structure:
//! - helpers: `TestSceneBuilder` and input shortcuts
//! - integration: Multi-component workflow tests driven through the bus
//! - unit: Single-component unit tests

mod helpers;
mod unit;
