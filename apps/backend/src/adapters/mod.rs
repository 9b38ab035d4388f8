//! Adapters for external dependencies.

pub mod documents;
pub mod geocoding;
