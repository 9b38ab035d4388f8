//! Player bookkeeping: running scores and the codes each player holds.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::adapters::documents::{document_to_player, player_fields, player_to_document};
use crate::domain::Player;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::infra::store::DocumentStore;
use crate::infra::store_errors::map_store_err;

pub const COLLECTION: &str = "players";

#[derive(Debug, Clone)]
pub struct PlayerRepository {
    store: Arc<dyn DocumentStore>,
}

impl PlayerRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a player with a store-generated id and a zero score.
    #[instrument(skip(self))]
    pub async fn create_player(&self, username: &str) -> Result<Player, DomainError> {
        let mut player = new_player(username)?;
        let doc = player_to_document(&player)?;
        player.id = self
            .store
            .add(COLLECTION, doc)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Player))?;
        debug!(player_id = %player.id, "player created");
        Ok(player)
    }

    /// Create (or reset) a player under a caller-chosen id, such as a device id.
    #[instrument(skip(self))]
    pub async fn register_player(&self, id: &str, username: &str) -> Result<Player, DomainError> {
        let mut player = new_player(username)?;
        self.store
            .set(COLLECTION, id, player_to_document(&player)?)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Player))?;
        player.id = id.to_string();
        Ok(player)
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, player_id: &str) -> Result<Player, DomainError> {
        let doc = self
            .store
            .get(COLLECTION, player_id)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Player))?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
            })?;
        document_to_player(doc)
    }

    /// Add `delta` (possibly negative) to the player's score.
    #[instrument(skip(self))]
    pub async fn add_score_to_player(&self, player_id: &str, delta: i64) -> Result<(), DomainError> {
        self.store
            .increment(COLLECTION, player_id, player_fields::SCORE, delta)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Player))
    }

    #[instrument(skip(self))]
    pub async fn add_qr_code_to_player(
        &self,
        player_id: &str,
        qr_code_id: &str,
    ) -> Result<(), DomainError> {
        self.store
            .array_union(
                COLLECTION,
                player_id,
                player_fields::QR_CODE_IDS,
                vec![Value::from(qr_code_id)],
            )
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Player))
    }

    #[instrument(skip(self))]
    pub async fn remove_qr_code_from_player(
        &self,
        player_id: &str,
        qr_code_id: &str,
    ) -> Result<(), DomainError> {
        self.store
            .array_remove(
                COLLECTION,
                player_id,
                player_fields::QR_CODE_IDS,
                vec![Value::from(qr_code_id)],
            )
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Player))
    }
}

fn new_player(username: &str) -> Result<Player, DomainError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyUsername,
            "Username cannot be empty",
        ));
    }
    Ok(Player {
        username: username.to_string(),
        ..Player::default()
    })
}
