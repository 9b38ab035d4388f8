//! Comment storage. Comments are append-only.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{instrument, warn};

use crate::adapters::documents::{comment_to_document, document_to_comment};
use crate::domain::Comment;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::store::DocumentStore;
use crate::infra::store_errors::map_store_err;

pub const COLLECTION: &str = "comments";

#[derive(Debug, Clone)]
pub struct CommentRepository {
    store: Arc<dyn DocumentStore>,
}

impl CommentRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store `comment` against `qr_code_id` and return the new comment id.
    ///
    /// Linking the id back onto the QR code is the caller's job.
    #[instrument(skip(self, comment), fields(player_id = %comment.player_id))]
    pub async fn add_comment(
        &self,
        qr_code_id: &str,
        comment: &Comment,
    ) -> Result<String, DomainError> {
        let mut stored = comment.clone();
        stored.qr_code_id = qr_code_id.to_string();

        self.store
            .add(COLLECTION, comment_to_document(&stored)?)
            .await
            .map_err(|e| map_store_err(e, NotFoundKind::Comment))
    }

    /// Fetch comments by id, keeping the order of `ids`.
    ///
    /// Ids with no stored comment are skipped.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_comments(&self, ids: &[String]) -> Result<Vec<Comment>, DomainError> {
        let lookups = ids.iter().map(|id| async move {
            self.store
                .get(COLLECTION, id)
                .await
                .map_err(|e| map_store_err(e, NotFoundKind::Comment))
        });

        let mut comments = Vec::with_capacity(ids.len());
        for (id, doc) in ids.iter().zip(try_join_all(lookups).await?) {
            match doc {
                Some(doc) => comments.push(document_to_comment(doc)?),
                None => warn!(comment_id = %id, "comment id has no stored comment"),
            }
        }
        Ok(comments)
    }
}
