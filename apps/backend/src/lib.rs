#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Data-access layer for the QR Hunter scavenger hunt.
//!
//! Scanned QR codes are hashed into a deterministic score, stored as
//! documents, and attached to or detached from players while keeping
//! their running scores in step.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use adapters::geocoding::{GeocodeError, Geocoder, NominatimGeocoder};
pub use config::{AppConfig, DuplicateScanPolicy};
pub use domain::{Comment, GeoPoint, Player, QrCode};
pub use error::AppError;
pub use errors::DomainError;
pub use infra::state::{build_state, AppState};
pub use infra::store::{DocumentStore, InMemoryStore};
pub use repos::comments::CommentRepository;
pub use repos::players::PlayerRepository;
pub use repos::qr_codes::{AttachOutcome, QrCodeRepository};
pub use services::QrCodeViewModel;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
