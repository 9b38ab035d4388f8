//! Error handling for the qrhunter data layer.

pub mod domain;

pub use domain::DomainError;
