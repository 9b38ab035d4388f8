//! Runtime configuration read from the environment.

pub mod geocoder;
pub mod scan_policy;

use std::env;

use tracing::info;

pub use geocoder::GeocoderConfig;
pub use scan_policy::DuplicateScanPolicy;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub geocoder: GeocoderConfig,
    pub duplicate_scans: DuplicateScanPolicy,
}

impl AppConfig {
    /// Load configuration; unset variables take their defaults, malformed
    /// ones are a configuration error.
    pub fn from_env() -> Result<Self, AppError> {
        let geocoder = GeocoderConfig::from_env()?;

        let duplicate_scans = match env::var("QRHUNTER_DUPLICATE_SCANS") {
            Ok(raw) => raw.parse::<DuplicateScanPolicy>().map_err(AppError::config)?,
            Err(_) => DuplicateScanPolicy::default(),
        };

        info!(
            geocoder_url = %geocoder.base_url,
            timeout_ms = geocoder.timeout.as_millis() as u64,
            duplicate_scans = %duplicate_scans,
            "configuration loaded"
        );

        Ok(Self {
            geocoder,
            duplicate_scans,
        })
    }
}
