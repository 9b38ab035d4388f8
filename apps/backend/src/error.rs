use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Application-level error for bootstrap and configuration paths.
///
/// Repository calls return [`DomainError`]; embedding code that wants a
/// single error type can lift them with `?` through the `From` impl below.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable SCREAMING_SNAKE_CASE code for logs and clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::NotFound { code, .. } | AppError::Validation { code, .. } => *code,
            AppError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        use crate::errors::domain::{NotFoundKind, ValidationKind};

        match err {
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::QrCode => "QR_CODE_NOT_FOUND",
                    NotFoundKind::Player => "PLAYER_NOT_FOUND",
                    NotFoundKind::Comment => "COMMENT_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::EmptyComment => "EMPTY_COMMENT",
                    ValidationKind::CommentTooLong => "COMMENT_TOO_LONG",
                    ValidationKind::EmptyUsername => "EMPTY_USERNAME",
                    ValidationKind::EmptyPayload => "EMPTY_PAYLOAD",
                    _ => "VALIDATION_ERROR",
                };
                AppError::Validation { code, detail }
            }
            DomainError::Infra(InfraErrorKind::Timeout | InfraErrorKind::StoreUnavailable, detail) => {
                AppError::StoreUnavailable { detail }
            }
            DomainError::Infra(_, detail) => AppError::Internal { detail },
        }
    }
}
