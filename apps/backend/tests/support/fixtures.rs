//! Shared setup for repository and view-model tests.

use std::sync::Arc;

use backend_test_support::unique_helpers::unique_str;
use qrhunter::infra::store::DocumentStore;
use qrhunter::{build_state, AppConfig, AppState, DuplicateScanPolicy, GeoPoint, Player, QrCode};

use super::faulty_store::FaultyStore;
use super::stub_geocoder::StubGeocoder;

pub struct TestEnv {
    pub store: Arc<FaultyStore>,
    pub geocoder: Arc<StubGeocoder>,
    pub state: AppState,
}

pub fn test_env() -> TestEnv {
    test_env_with_policy(DuplicateScanPolicy::Reaward)
}

pub fn test_env_with_policy(policy: DuplicateScanPolicy) -> TestEnv {
    let store = Arc::new(FaultyStore::new());
    let geocoder = Arc::new(StubGeocoder::new());
    let config = AppConfig {
        duplicate_scans: policy,
        ..AppConfig::default()
    };

    let state = build_state()
        .with_config(config)
        .with_store(Arc::clone(&store) as Arc<dyn DocumentStore>)
        .with_geocoder(Arc::clone(&geocoder) as Arc<dyn qrhunter::Geocoder>)
        .build()
        .expect("build test state");

    TestEnv {
        store,
        geocoder,
        state,
    }
}

pub async fn new_player(state: &AppState) -> Player {
    state
        .players
        .create_player(&unique_str("hunter"))
        .await
        .expect("create player")
}

pub async fn score_of(state: &AppState, player_id: &str) -> i64 {
    state
        .players
        .get_player(player_id)
        .await
        .expect("load player")
        .score
}

/// A sighting with a fixed hash and score, bypassing payload hashing.
pub fn sighting(hash: &str, score: i64, locations: Vec<GeoPoint>) -> QrCode {
    QrCode {
        hash: hash.to_string(),
        name: format!("code-{hash}"),
        score,
        locations,
        ..QrCode::default()
    }
}
