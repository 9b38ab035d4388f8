//! Reverse geocoding of stored scan locations.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::geocoder::GeocoderConfig;
use crate::domain::GeoPoint;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("geocoder returned HTTP {0}")]
    Status(u16),
    #[error("malformed geocoder response: {0}")]
    Malformed(String),
}

/// Maps coordinates to a human-readable address.
///
/// `Ok(None)` means the service answered but knows no address there.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError>;
}

/// Geocoder backed by a Nominatim-compatible `/reverse` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reverse_url(&self, point: GeoPoint) -> String {
        format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}",
            self.base_url, point.latitude, point.longitude
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        let response = self.client.get(self.reverse_url(point)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let address = parse_reverse_response(&body)?;
        debug!(found = address.is_some(), "reverse geocode complete");
        Ok(address)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Extract the address line from a `/reverse` JSON body.
pub fn parse_reverse_response(body: &str) -> Result<Option<String>, GeocodeError> {
    let parsed: ReverseResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;

    if let Some(error) = parsed.error {
        debug!(error = %error, "geocoder has no address for point");
        return Ok(None);
    }
    Ok(parsed
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn parses_display_name() {
        let body = r#"{"place_id":1,"display_name":"116 St NW, Edmonton, Alberta, Canada"}"#;
        assert_eq!(
            parse_reverse_response(body).unwrap().as_deref(),
            Some("116 St NW, Edmonton, Alberta, Canada")
        );
    }

    #[test]
    fn error_body_means_no_address() {
        let body = r#"{"error":"Unable to geocode"}"#;
        assert_eq!(parse_reverse_response(body).unwrap(), None);
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            parse_reverse_response("<html>"),
            Err(GeocodeError::Malformed(_))
        ));
    }

    #[test]
    fn url_uses_both_coordinates() {
        let geocoder = NominatimGeocoder::new(&GeocoderConfig {
            base_url: "https://geo.example.test/".into(),
            user_agent: "qrhunter-test".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        assert_eq!(
            geocoder.reverse_url(GeoPoint::new(53.5, -113.25)),
            "https://geo.example.test/reverse?format=jsonv2&lat=53.5&lon=-113.25"
        );
    }
}
