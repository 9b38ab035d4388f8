//! Backend test support utilities
//!
//! Shared helpers for the qrhunter test suites: one-time logging
//! initialization and generators for unique ids and scan payloads.

pub mod logging;
pub mod unique_helpers;
