//! Conversion between domain types and store documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Comment, GeoPoint, Player, QrCode};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::store::{Document, StoredDocument};

/// Field names of the `qrCodes` collection.
pub mod qr_fields {
    pub const HASH: &str = "hash";
    pub const SCORE: &str = "score";
    pub const LOCATIONS: &str = "locations";
    pub const PHOTOS: &str = "photos";
    pub const PLAYER_IDS: &str = "playerIds";
    pub const COMMENT_IDS: &str = "commentIds";
}

/// Field names of the `players` collection.
pub mod player_fields {
    pub const SCORE: &str = "score";
    pub const QR_CODE_IDS: &str = "qrCodeIds";
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QrCodeDoc {
    hash: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    visual_representation: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    locations: Vec<GeoPoint>,
    #[serde(default)]
    photos: Vec<String>,
    #[serde(default)]
    player_ids: Vec<String>,
    #[serde(default)]
    comment_ids: Vec<String>,
}

fn to_document<T: Serialize>(value: &T, what: &str) -> Result<Document, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::infra(
            InfraErrorKind::Other("Serialization".into()),
            format!("{what} serialized to non-object {other}"),
        )),
        Err(e) => Err(DomainError::infra(
            InfraErrorKind::Other("Serialization".into()),
            format!("failed to serialize {what}: {e}"),
        )),
    }
}

fn from_document<T: DeserializeOwned>(doc: StoredDocument, what: &str) -> Result<T, DomainError> {
    serde_json::from_value(Value::Object(doc.data)).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{what} {} is malformed: {e}", doc.id),
        )
    })
}

pub fn qr_code_to_document(qr_code: &QrCode) -> Result<Document, DomainError> {
    let doc = QrCodeDoc {
        hash: qr_code.hash.clone(),
        name: qr_code.name.clone(),
        visual_representation: qr_code.visual_representation.clone(),
        score: qr_code.score,
        locations: qr_code.locations.clone(),
        photos: qr_code.photos.clone(),
        player_ids: qr_code.player_ids.clone(),
        comment_ids: qr_code.comment_ids.clone(),
    };
    to_document(&doc, "QR code")
}

pub fn document_to_qr_code(doc: StoredDocument) -> Result<QrCode, DomainError> {
    let id = doc.id.clone();
    let parsed: QrCodeDoc = from_document(doc, "QR code")?;
    Ok(QrCode {
        id,
        hash: parsed.hash,
        name: parsed.name,
        visual_representation: parsed.visual_representation,
        score: parsed.score,
        locations: parsed.locations,
        photos: parsed.photos,
        player_ids: parsed.player_ids,
        comment_ids: parsed.comment_ids,
    })
}

pub fn geo_point_value(point: &GeoPoint) -> Result<Value, DomainError> {
    to_document(point, "location").map(Value::Object)
}

pub fn player_to_document(player: &Player) -> Result<Document, DomainError> {
    to_document(player, "player")
}

pub fn document_to_player(doc: StoredDocument) -> Result<Player, DomainError> {
    let id = doc.id.clone();
    let mut player: Player = from_document(doc, "player")?;
    player.id = id;
    Ok(player)
}

pub fn comment_to_document(comment: &Comment) -> Result<Document, DomainError> {
    to_document(comment, "comment")
}

pub fn document_to_comment(doc: StoredDocument) -> Result<Comment, DomainError> {
    let id = doc.id.clone();
    let mut comment: Comment = from_document(doc, "comment")?;
    comment.id = id;
    Ok(comment)
}
