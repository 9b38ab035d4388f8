//! Test helpers for generating unique test data
//!
//! ULID-suffixed values keep tests isolated when they share a store.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique scan payload, as if read off a freshly printed QR code.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_payload;
///
/// let payload = unique_payload();
/// assert!(payload.starts_with("https://qr.example.test/"));
/// ```
pub fn unique_payload() -> String {
    format!("https://qr.example.test/{}", Ulid::new())
}
