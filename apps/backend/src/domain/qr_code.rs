//! QR code sightings and the rule that decides when two are the same code.

use serde::{Deserialize, Serialize};

use crate::domain::scoring::{content_hash, name_for_hash, score_for_hash, visual_for_hash};
use crate::errors::domain::{DomainError, ValidationKind};

/// A latitude/longitude pair recorded where a code was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A QR code record as the rest of the application sees it.
///
/// `id` is assigned by the store and stays empty on a fresh sighting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QrCode {
    pub id: String,
    pub hash: String,
    pub name: String,
    pub visual_representation: String,
    pub score: i64,
    pub locations: Vec<GeoPoint>,
    pub photos: Vec<String>,
    pub player_ids: Vec<String>,
    pub comment_ids: Vec<String>,
}

impl QrCode {
    /// Build a candidate sighting from a raw scanned payload.
    pub fn from_scan(
        payload: &str,
        location: Option<GeoPoint>,
        photo: Option<String>,
    ) -> Result<Self, DomainError> {
        if payload.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyPayload,
                "Scanned payload is empty",
            ));
        }

        let hash = content_hash(payload.as_bytes());
        Ok(Self {
            id: String::new(),
            name: name_for_hash(&hash),
            visual_representation: visual_for_hash(&hash),
            score: score_for_hash(&hash),
            locations: location.into_iter().collect(),
            photos: photo.into_iter().collect(),
            hash,
            ..Self::default()
        })
    }

    pub fn has_location(&self) -> bool {
        !self.locations.is_empty()
    }

    /// Two sightings are the same code when their hashes match and they
    /// agree on whether a location was recorded. Location values are not
    /// compared.
    pub fn is_equivalent(&self, other: &QrCode) -> bool {
        self.hash == other.hash && self.has_location() == other.has_location()
    }

    /// Key under which equivalent sightings are serialized on creation.
    pub fn equivalence_key(&self) -> String {
        let presence = if self.has_location() { "loc" } else { "noloc" };
        format!("{}:{presence}", self.hash)
    }

    pub fn is_scanned_by(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }
}
