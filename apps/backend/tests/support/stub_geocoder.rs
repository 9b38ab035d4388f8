//! Geocoder double keyed by coordinates.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use qrhunter::{GeoPoint, GeocodeError, Geocoder};

#[derive(Debug, Default)]
pub struct StubGeocoder {
    answers: Mutex<HashMap<(u64, u64), Option<String>>>,
    calls: Mutex<Vec<GeoPoint>>,
}

fn key(point: GeoPoint) -> (u64, u64) {
    (point.latitude.to_bits(), point.longitude.to_bits())
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `address` for `point`. Points never registered fail.
    pub fn answer(&self, point: GeoPoint, address: Option<&str>) {
        self.answers
            .lock()
            .insert(key(point), address.map(str::to_string));
    }

    pub fn calls(&self) -> Vec<GeoPoint> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        self.calls.lock().push(point);
        match self.answers.lock().get(&key(point)) {
            Some(answer) => Ok(answer.clone()),
            None => Err(GeocodeError::Malformed(format!(
                "no stubbed answer for {point:?}"
            ))),
        }
    }
}
