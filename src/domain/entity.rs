//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Variants follow the request-failure taxonomy: a transport layer maps
/// them to status codes via `status_code()`. Ownership mismatches on
/// single-item operations surface as `NotFound` so that one user can never
/// probe for another user's icons; only the reorder batch reports
/// `Forbidden` with the offending id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    Validation(String),
    Unauthenticated,
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl DomainError {
    /// HTTP-style status code for the transport layer
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation(_) => 400,
            DomainError::Unauthenticated => 401,
            DomainError::Forbidden(_) => 403,
            DomainError::NotFound(_) => 404,
            DomainError::Conflict(_) => 409,
            DomainError::Internal(_) => 500,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Unauthenticated => write!(f, "Unauthenticated"),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
