//! Domain layer: QR codes, players, comments and the pure rules over them.

pub mod comment;
pub mod player;
pub mod qr_code;
pub mod scoring;

pub use comment::Comment;
pub use player::Player;
pub use qr_code::{GeoPoint, QrCode};
