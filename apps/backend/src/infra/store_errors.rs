//! StoreError -> DomainError translation helpers.
//!
//! Repositories convert store failures here so callers only ever see
//! `DomainError`, with not-found, transient and corrupt cases kept apart.

use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::store::StoreError;

/// Translate a `StoreError` raised while working on a `kind` entity.
pub fn map_store_err(e: StoreError, kind: NotFoundKind) -> DomainError {
    match e {
        StoreError::NotFound { collection, id } => {
            DomainError::not_found(kind, format!("{collection}/{id} not found"))
        }
        StoreError::Timeout(detail) => {
            warn!(detail = %detail, "store operation timed out");
            DomainError::infra(InfraErrorKind::Timeout, detail)
        }
        StoreError::Unavailable(detail) => {
            warn!(detail = %detail, "store unavailable");
            DomainError::infra(InfraErrorKind::StoreUnavailable, detail)
        }
        StoreError::Corrupt(detail) => {
            error!(detail = %detail, "store returned corrupt data");
            DomainError::infra(InfraErrorKind::DataCorruption, detail)
        }
    }
}
