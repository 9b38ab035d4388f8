//! Comments left on a QR code.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_COMMENT_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub qr_code_id: String,
    pub player_id: String,
    pub content: String,
    /// Unix seconds.
    pub created_at: i64,
}

impl Comment {
    /// Build a comment, normalizing and validating its text.
    ///
    /// The QR code it belongs to is filled in when it is stored.
    pub fn new(player_id: impl Into<String>, content: &str) -> Result<Self, DomainError> {
        let content = normalize_content(content)?;
        Ok(Self {
            id: String::new(),
            qr_code_id: String::new(),
            player_id: player_id.into(),
            content,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        })
    }
}

fn normalize_content(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.nfc().collect();
    let trimmed = normalized.trim();

    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyComment,
            "Comment cannot be empty",
        ));
    }
    let len = trimmed.chars().count();
    if len > MAX_COMMENT_CHARS {
        return Err(DomainError::validation(
            ValidationKind::CommentTooLong,
            format!("Comment is {len} characters, limit is {MAX_COMMENT_CHARS}"),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_content() {
        let c = Comment::new("p1", "  nice find  ").unwrap();
        assert_eq!(c.content, "nice find");
        assert_eq!(c.player_id, "p1");
        assert!(c.created_at > 0);
    }

    #[test]
    fn normalizes_to_nfc() {
        // "e" + combining acute accent composes to a single char
        let c = Comment::new("p1", "cafe\u{301}").unwrap();
        assert_eq!(c.content, "caf\u{e9}");
    }

    #[test]
    fn rejects_blank() {
        let err = Comment::new("p1", " \n\t ").unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::EmptyComment, _)
        ));
    }

    #[test]
    fn rejects_overlong() {
        let long = "x".repeat(MAX_COMMENT_CHARS + 1);
        let err = Comment::new("p1", &long).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::CommentTooLong, _)
        ));
        assert!(Comment::new("p1", &"x".repeat(MAX_COMMENT_CHARS)).is_ok());
    }
}
