// In crates/platform/src/error.rs

use core_types::ValidationError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The record kinds, used to phrase not-found and conflict messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Symbol,
    RiskProfile,
    Challenge,
    Vault,
    Position,
    Trade,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::User => "User",
            EntityKind::Symbol => "Symbol",
            EntityKind::RiskProfile => "Risk profile",
            EntityKind::Challenge => "Challenge",
            EntityKind::Vault => "Vault",
            EntityKind::Position => "Position",
            EntityKind::Trade => "Trade",
        })
    }
}

/// The fixed set of codes a failed procedure reports to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    Forbidden,
    BadRequest,
    Conflict,
    InternalServerError,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{entity} with this {field} already exists")]
    Conflict { entity: EntityKind, field: String },

    /// The message is safe to show; the underlying cause is only logged.
    #[error("{0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Validation(_) | Error::BadRequest(_) => ErrorCode::BadRequest,
            Error::NotFound { .. } => ErrorCode::NotFound,
            Error::Forbidden(_) => ErrorCode::Forbidden,
            Error::Conflict { .. } => ErrorCode::Conflict,
            Error::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

/// Builds the `map_err` adapter for a storage call.
///
/// Duplicate keys become `Conflict`. Anything else is logged in full and
/// replaced by a generic `Internal` error such as "Failed to create trade".
pub(crate) fn storage(
    entity: EntityKind,
    action: &'static str,
) -> impl FnOnce(database::Error) -> Error {
    move |err| match err {
        database::Error::DuplicateKey { field } => {
            tracing::warn!(%entity, field = %field, "Unique key already taken");
            Error::Conflict { entity, field }
        }
        other => {
            tracing::error!(error = ?other, %entity, action, "Storage call failed");
            Error::Internal(format!("Failed to {action}"))
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
