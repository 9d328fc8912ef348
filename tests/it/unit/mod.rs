//! Unit tests for worldhost.

mod location_tests;
mod notifications_tests;
mod perf_tests;
mod snapshot_tests;
