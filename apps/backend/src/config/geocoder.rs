use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_GEOCODER_TIMEOUT_MS: u64 = 5000;

/// Settings for the reverse-geocoding client.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: Duration::from_millis(DEFAULT_GEOCODER_TIMEOUT_MS),
        }
    }
}

impl GeocoderConfig {
    /// Read geocoder settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let base_url =
            env::var("QRHUNTER_GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "QRHUNTER_GEOCODER_URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        let user_agent =
            env::var("QRHUNTER_GEOCODER_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        let timeout_ms = match env::var("QRHUNTER_GEOCODER_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::config(format!(
                    "QRHUNTER_GEOCODER_TIMEOUT_MS must be a whole number of milliseconds, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_GEOCODER_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            user_agent,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn default_user_agent() -> String {
    format!("qrhunter/{}", env!("CARGO_PKG_VERSION"))
}
