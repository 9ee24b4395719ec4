//! Backend test support utilities
//!
//! Shared by the backend's unit tests and integration test binaries:
//! one-time logging initialization and problem-details assertions.

pub mod logging;
pub mod problem_details;
