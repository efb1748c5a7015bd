//! Icon Positioning Operations
//!
//! Position allocation for new icons within a sibling set.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, IconId, UserId};

/// Trait for icon positioning operations
#[async_trait]
pub trait IconPositioningOperations {
    /// Next free position in the `(owner, parent)` sibling set: one past the
    /// current maximum, 0 when the set is empty. Gaps or duplicate positions
    /// in existing data are tolerated; only the maximum matters.
    async fn next_position(&self, owner: UserId, parent_id: Option<IconId>) -> DomainResult<i64>;
}

#[async_trait]
impl IconPositioningOperations for super::icon_repo::IconRepository {
    async fn next_position(&self, owner: UserId, parent_id: Option<IconId>) -> DomainResult<i64> {
        let conn = self.conn.lock().await;

        let next = match parent_id {
            Some(pid) => conn.query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM icons \
                 WHERE owner_id = ? AND parent_id = ?",
                params![owner, pid],
                |row| row.get::<_, i64>(0),
            ),
            None => conn.query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM icons \
                 WHERE owner_id = ? AND parent_id IS NULL",
                params![owner],
                |row| row.get::<_, i64>(0),
            ),
        }
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(next)
    }
}
