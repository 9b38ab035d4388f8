use serde::{Deserialize, Serialize};

/// A player and their running score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(skip)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub qr_code_ids: Vec<String>,
}
