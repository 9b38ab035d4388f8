use std::sync::Arc;

use crate::adapters::geocoding::{Geocoder, NominatimGeocoder};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::infra::store::{DocumentStore, InMemoryStore};
use crate::repos::comments::CommentRepository;
use crate::repos::players::PlayerRepository;
use crate::repos::qr_codes::QrCodeRepository;
use crate::services::QrCodeViewModel;

/// Shared handles to the store-backed repositories.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn DocumentStore>,
    pub players: PlayerRepository,
    pub qr_codes: QrCodeRepository,
    pub comments: CommentRepository,
    pub geocoder: Arc<dyn Geocoder>,
}

impl AppState {
    /// A fresh view model bound to this state's repositories.
    pub fn view_model(&self) -> QrCodeViewModel {
        QrCodeViewModel::new(
            self.qr_codes.clone(),
            self.comments.clone(),
            Arc::clone(&self.geocoder),
        )
    }
}

/// Builder for creating AppState instances (used in both tests and embedding apps)
#[derive(Default)]
pub struct StateBuilder {
    config: Option<AppConfig>,
    store: Option<Arc<dyn DocumentStore>>,
    geocoder: Option<Arc<dyn Geocoder>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Missing pieces default to: config from the environment, an
    /// in-memory store and a Nominatim geocoder.
    pub fn build(self) -> Result<AppState, AppError> {
        let config = match self.config {
            Some(config) => config,
            None => AppConfig::from_env()?,
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()) as Arc<dyn DocumentStore>);

        let geocoder = match self.geocoder {
            Some(geocoder) => geocoder,
            None => {
                let nominatim = NominatimGeocoder::new(&config.geocoder).map_err(|e| {
                    AppError::config(format!("Unable to build geocoder client: {e}"))
                })?;
                Arc::new(nominatim) as Arc<dyn Geocoder>
            }
        };

        let players = PlayerRepository::new(Arc::clone(&store));
        let qr_codes = QrCodeRepository::new(Arc::clone(&store), players.clone())
            .with_duplicate_scan_policy(config.duplicate_scans);
        let comments = CommentRepository::new(Arc::clone(&store));

        Ok(AppState {
            config,
            store,
            players,
            qr_codes,
            comments,
            geocoder,
        })
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateScanPolicy;

    #[test]
    fn build_succeeds_with_explicit_config() {
        let config = AppConfig {
            duplicate_scans: DuplicateScanPolicy::Ignore,
            ..AppConfig::default()
        };
        let state = build_state().with_config(config).build().unwrap();
        assert_eq!(
            state.qr_codes.duplicate_scan_policy(),
            DuplicateScanPolicy::Ignore
        );
    }
}
