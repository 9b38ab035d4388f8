//! Store-backed repositories.

pub mod comments;
pub mod players;
pub mod qr_codes;
