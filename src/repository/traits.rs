//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access. Every operation takes
//! the owning user explicitly: the ownership filter is part of the contract,
//! not something callers opt into.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity, UserId};

/// Owner-scoped repository trait for CRUD operations
///
/// Generic over any owned Entity type. Reads never return another owner's
/// rows; writes against them behave as if the row did not exist.
#[async_trait]
pub trait OwnedRepository<T: Entity>: Send + Sync {
    /// Create a new entity for `owner`
    async fn create(&self, owner: UserId, entity: &T) -> DomainResult<T>;

    /// Find one of `owner`'s entities by ID
    async fn find_by_id(&self, owner: UserId, id: T::Id) -> DomainResult<Option<T>>;

    /// List all of `owner`'s entities
    async fn list(&self, owner: UserId) -> DomainResult<Vec<T>>;

    /// Update an existing entity owned by `owner`
    async fn update(&self, owner: UserId, entity: &T) -> DomainResult<T>;

    /// Delete one of `owner`'s entities by ID
    async fn delete(&self, owner: UserId, id: T::Id) -> DomainResult<()>;
}
