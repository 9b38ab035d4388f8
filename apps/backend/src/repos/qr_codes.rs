//! QR code records: equivalence lookup, attach/detach with score
//! bookkeeping, and the read accessors.
//!
//! Only the five core store primitives are used on the `qrCodes`
//! collection (`add`, `get`, `query`, `array_union`, `array_remove`).
//! Score changes go through [`PlayerRepository`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::adapters::documents::{
    document_to_qr_code, geo_point_value, qr_code_to_document, qr_fields,
};
use crate::config::DuplicateScanPolicy;
use crate::domain::QrCode;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::keyed_lock::KeyedLocks;
use crate::infra::store::{DocumentStore, Filter};
use crate::infra::store_errors::map_store_err;
use crate::repos::players::PlayerRepository;

pub const COLLECTION: &str = "qrCodes";

/// Result of attaching a scanned code to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachOutcome {
    pub qr_code_id: String,
    /// A new record was created for this scan.
    pub created: bool,
    /// Score added to the player.
    pub awarded: i64,
}

#[derive(Debug, Clone)]
pub struct QrCodeRepository {
    store: Arc<dyn DocumentStore>,
    players: PlayerRepository,
    /// Per equivalence key; guards record creation and player-set changes.
    creation_locks: Arc<KeyedLocks>,
    duplicate_scans: DuplicateScanPolicy,
}

impl QrCodeRepository {
    pub fn new(store: Arc<dyn DocumentStore>, players: PlayerRepository) -> Self {
        Self {
            store,
            players,
            creation_locks: Arc::new(KeyedLocks::new()),
            duplicate_scans: DuplicateScanPolicy::default(),
        }
    }

    pub fn with_duplicate_scan_policy(mut self, policy: DuplicateScanPolicy) -> Self {
        self.duplicate_scans = policy;
        self
    }

    pub fn duplicate_scan_policy(&self) -> DuplicateScanPolicy {
        self.duplicate_scans
    }

    /// Find the stored record equivalent to `candidate`, if any.
    ///
    /// Records sharing the hash are fetched and the first one that agrees
    /// on location presence wins. A failed query is an error, never "no match".
    #[instrument(skip(self, candidate), fields(hash = %candidate.hash))]
    pub async fn find_equivalent(&self, candidate: &QrCode) -> Result<Option<QrCode>, DomainError> {
        let filter = Filter::eq(qr_fields::HASH, candidate.hash.as_str());
        let docs = self
            .store
            .query(COLLECTION, Some(&filter))
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::QrCode))?;

        if docs.is_empty() {
            return Ok(None);
        }

        for doc in docs {
            let stored = document_to_qr_code(doc)?;
            if stored.is_equivalent(candidate) {
                debug!(qr_code_id = %stored.id, "equivalent code found");
                return Ok(Some(stored));
            }
        }
        Ok(None)
    }

    /// Record that `player_id` scanned `candidate`.
    ///
    /// Creates the record on first sight of a (hash, location presence)
    /// pair; otherwise adds the player and at most one new location and
    /// photo to the existing record. Either way the player is awarded the
    /// code's score, subject to the duplicate scan policy.
    ///
    /// The player's own `qr_code_ids` list is not touched here; callers
    /// that track it use [`PlayerRepository::add_qr_code_to_player`] with
    /// the returned id.
    ///
    /// The code's equivalence key stays locked until the player is in the
    /// record's player set, so the membership check the policy relies on
    /// is serialized with detach and other scans of the same code.
    #[instrument(skip(self, candidate), fields(hash = %candidate.hash))]
    pub async fn add_to_player(
        &self,
        candidate: &QrCode,
        player_id: &str,
    ) -> Result<AttachOutcome, DomainError> {
        // Fail before touching the code if the score can't be credited.
        self.players.get_player(player_id).await?;

        let guard = self.creation_locks.lock(&candidate.equivalence_key()).await;

        let Some(existing) = self.find_equivalent(candidate).await? else {
            let mut record = candidate.clone();
            record.id.clear();
            if !record.is_scanned_by(player_id) {
                record.player_ids.push(player_id.to_string());
            }

            let qr_code_id = self
                .store
                .add(COLLECTION, qr_code_to_document(&record)?)
                .await
                .map_err(|e| map_store_err(e, NotFoundKind::QrCode))?;
            drop(guard);

            if let Err(e) = self
                .players
                .add_score_to_player(player_id, candidate.score)
                .await
            {
                error!(
                    qr_code_id = %qr_code_id,
                    player_id,
                    score = candidate.score,
                    error = %e,
                    "QR code recorded for player but score was not awarded"
                );
                return Err(e);
            }
            info!(qr_code_id = %qr_code_id, score = candidate.score, "new QR code recorded");

            return Ok(AttachOutcome {
                qr_code_id,
                created: true,
                awarded: candidate.score,
            });
        };

        let already_scanned = existing.is_scanned_by(player_id);
        self.union(&existing.id, qr_fields::PLAYER_IDS, Value::from(player_id))
            .await?;
        drop(guard);

        if let Some(location) = candidate.locations.first() {
            self.union(&existing.id, qr_fields::LOCATIONS, geo_point_value(location)?)
                .await?;
        }
        if let Some(photo) = candidate.photos.first() {
            self.union(&existing.id, qr_fields::PHOTOS, Value::from(photo.as_str()))
                .await?;
        }

        let awarded = match self.duplicate_scans {
            DuplicateScanPolicy::Ignore if already_scanned => 0,
            _ => candidate.score,
        };
        if awarded != 0 {
            self.players.add_score_to_player(player_id, awarded).await?;
        }
        debug!(qr_code_id = %existing.id, already_scanned, awarded, "scan merged into existing code");

        Ok(AttachOutcome {
            qr_code_id: existing.id,
            created: false,
            awarded,
        })
    }

    /// Detach `player_id` from a code and take back its score.
    ///
    /// Returns the delta applied to the player (zero or negative). The
    /// record itself is never deleted. The detach and the score change are
    /// separate writes: if the second fails the player stays detached and
    /// the error is returned.
    ///
    /// Membership is read and removed under the code's equivalence-key
    /// lock, the same one attach holds.
    #[instrument(skip(self))]
    pub async fn remove_from_player(
        &self,
        qr_code_id: &str,
        player_id: &str,
    ) -> Result<i64, DomainError> {
        let key = self.get(qr_code_id).await?.equivalence_key();
        let guard = self.creation_locks.lock(&key).await;

        // Re-read under the lock: a concurrent scan or detach may have
        // changed the player set since the key was resolved.
        let record = self.get(qr_code_id).await?;
        let was_scanned = record.is_scanned_by(player_id);

        self.store
            .array_remove(
                COLLECTION,
                qr_code_id,
                qr_fields::PLAYER_IDS,
                vec![Value::from(player_id)],
            )
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::QrCode))?;
        drop(guard);

        let delta = match self.duplicate_scans {
            DuplicateScanPolicy::Ignore if !was_scanned => 0,
            _ => -record.score,
        };
        if delta != 0 {
            if let Err(e) = self.players.add_score_to_player(player_id, delta).await {
                error!(
                    qr_code_id,
                    player_id,
                    delta,
                    error = %e,
                    "player detached from QR code but score was not adjusted"
                );
                return Err(e);
            }
        }
        Ok(delta)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, qr_code_id: &str) -> Result<QrCode, DomainError> {
        let doc = self
            .store
            .get(COLLECTION, qr_code_id)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::QrCode))?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::QrCode,
                    format!("QR code {qr_code_id} not found"),
                )
            })?;
        document_to_qr_code(doc)
    }

    /// Every code whose player set contains `player_id`.
    #[instrument(skip(self))]
    pub async fn scanned_by_player(&self, player_id: &str) -> Result<Vec<QrCode>, DomainError> {
        let filter = Filter::array_contains(qr_fields::PLAYER_IDS, player_id);
        self.store
            .query(COLLECTION, Some(&filter))
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::QrCode))?
            .into_iter()
            .map(document_to_qr_code)
            .collect()
    }

    /// Number of players holding the code, as recorded on the record.
    #[instrument(skip(self))]
    pub async fn scanned_by_count(&self, qr_code_id: &str) -> Result<usize, DomainError> {
        Ok(self.get(qr_code_id).await?.player_ids.len())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<QrCode>, DomainError> {
        self.store
            .query(COLLECTION, None)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::QrCode))?
            .into_iter()
            .map(document_to_qr_code)
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn add_comment_id(&self, qr_code_id: &str, comment_id: &str) -> Result<(), DomainError> {
        self.union(qr_code_id, qr_fields::COMMENT_IDS, Value::from(comment_id))
            .await
    }

    async fn union(&self, qr_code_id: &str, field: &str, value: Value) -> Result<(), DomainError> {
        self.store
            .array_union(COLLECTION, qr_code_id, field, vec![value])
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::QrCode))
    }
}
