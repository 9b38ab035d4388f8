//! Presentation adapter for the QR code detail screen.
//!
//! Wraps repository calls and publishes their results on `watch`
//! channels, so any UI layer can subscribe without the repositories
//! knowing about it. Every operation also returns its `Result`; nothing
//! fails silently.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::adapters::geocoding::Geocoder;
use crate::domain::{Comment, QrCode};
use crate::errors::domain::DomainError;
use crate::repos::comments::CommentRepository;
use crate::repos::qr_codes::QrCodeRepository;

#[derive(Debug)]
pub struct QrCodeViewModel {
    qr_codes: QrCodeRepository,
    comments_repo: CommentRepository,
    geocoder: Arc<dyn Geocoder>,
    qr_code: watch::Sender<Option<QrCode>>,
    scanned_by: watch::Sender<usize>,
    comments: watch::Sender<Vec<Comment>>,
}

impl QrCodeViewModel {
    pub fn new(
        qr_codes: QrCodeRepository,
        comments_repo: CommentRepository,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            qr_codes,
            comments_repo,
            geocoder,
            qr_code: watch::Sender::new(None),
            scanned_by: watch::Sender::new(0),
            comments: watch::Sender::new(Vec::new()),
        }
    }

    pub fn qr_code(&self) -> watch::Receiver<Option<QrCode>> {
        self.qr_code.subscribe()
    }

    pub fn scanned_by(&self) -> watch::Receiver<usize> {
        self.scanned_by.subscribe()
    }

    pub fn comments(&self) -> watch::Receiver<Vec<Comment>> {
        self.comments.subscribe()
    }

    /// Fetch a code and publish it.
    #[instrument(skip(self))]
    pub async fn load_qr_code(&self, qr_code_id: &str) -> Result<QrCode, DomainError> {
        let qr_code = self.qr_codes.get(qr_code_id).await?;
        self.qr_code.send_replace(Some(qr_code.clone()));
        Ok(qr_code)
    }

    #[instrument(skip(self, qr_code), fields(qr_code_id = %qr_code.id))]
    pub async fn load_scanned_by(&self, qr_code: &QrCode) -> Result<usize, DomainError> {
        let count = self.qr_codes.scanned_by_count(&qr_code.id).await?;
        self.scanned_by.send_replace(count);
        Ok(count)
    }

    #[instrument(skip(self, qr_code), fields(qr_code_id = %qr_code.id))]
    pub async fn load_comments(&self, qr_code: &QrCode) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments_repo.get_comments(&qr_code.comment_ids).await?;
        self.comments.send_replace(comments.clone());
        Ok(comments)
    }

    /// Store a comment, show it immediately, and link it to the code.
    ///
    /// Returns the new comment id.
    #[instrument(skip(self, qr_code, comment), fields(qr_code_id = %qr_code.id))]
    pub async fn add_comment(
        &self,
        qr_code: &QrCode,
        comment: Comment,
    ) -> Result<String, DomainError> {
        let comment_id = self.comments_repo.add_comment(&qr_code.id, &comment).await?;

        let mut shown = comment;
        shown.id = comment_id.clone();
        shown.qr_code_id = qr_code.id.clone();
        self.comments.send_modify(|comments| comments.push(shown));

        self.qr_codes.add_comment_id(&qr_code.id, &comment_id).await?;
        Ok(comment_id)
    }

    /// Human-readable address for each stored location, in order.
    ///
    /// A failed or empty lookup yields an empty string for that point.
    #[instrument(skip(self, qr_code), fields(points = qr_code.locations.len()))]
    pub async fn addresses(&self, qr_code: &QrCode) -> Vec<String> {
        let lookups = qr_code.locations.iter().map(|point| async move {
            match self.geocoder.reverse(*point).await {
                Ok(Some(address)) => address,
                Ok(None) => String::new(),
                Err(e) => {
                    debug!(error = %e, "reverse geocode failed");
                    String::new()
                }
            }
        });
        join_all(lookups).await
    }
}
