//! Icon Hierarchy Operations
//!
//! Parent/children queries and the tree-integrity checks applied when icons
//! are created, re-parented, or listed.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::icon_repo::{row_to_icon, ICON_COLUMNS};
use crate::domain::{DomainError, DomainResult, Icon, IconId, UserId};

/// Trait for icon hierarchy operations
#[async_trait]
pub trait IconHierarchyOperations {
    /// Root-level icons for an owner, ordered by position
    async fn list_roots(&self, owner: UserId) -> DomainResult<Vec<Icon>>;

    /// Direct children of a parent, ordered by position. A parent the owner
    /// does not hold yields an empty list, never another user's rows.
    async fn list_children(&self, owner: UserId, parent_id: IconId) -> DomainResult<Vec<Icon>>;

    /// All transitive descendants of an icon
    async fn get_descendants(&self, owner: UserId, id: IconId) -> DomainResult<Vec<Icon>>;

    /// Resolve a parent reference for create/move: it must be one of the
    /// owner's own folders. A missing, foreign, or non-folder parent is a
    /// validation failure (foreign parents are deliberately reported the
    /// same as missing ones).
    async fn resolve_parent_folder(&self, owner: UserId, parent_id: IconId) -> DomainResult<Icon>;

    /// Whether re-parenting `id` under `new_parent_id` would make the icon
    /// an ancestor of itself. Walks the parent chain upward from the
    /// proposed parent.
    async fn would_create_cycle(
        &self,
        owner: UserId,
        id: IconId,
        new_parent_id: IconId,
    ) -> DomainResult<bool>;
}

#[async_trait]
impl IconHierarchyOperations for super::icon_repo::IconRepository {
    async fn list_roots(&self, owner: UserId) -> DomainResult<Vec<Icon>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM icons WHERE owner_id = ? AND parent_id IS NULL ORDER BY position",
                ICON_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner], row_to_icon)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut icons = Vec::new();
        for row in rows {
            icons.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(icons)
    }

    async fn list_children(&self, owner: UserId, parent_id: IconId) -> DomainResult<Vec<Icon>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM icons WHERE owner_id = ? AND parent_id = ? ORDER BY position",
                ICON_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner, parent_id], row_to_icon)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut icons = Vec::new();
        for row in rows {
            icons.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(icons)
    }

    async fn get_descendants(&self, owner: UserId, id: IconId) -> DomainResult<Vec<Icon>> {
        let conn = self.conn.lock().await;
        let mut result = Vec::new();
        let mut to_visit = vec![id];

        while let Some(current) = to_visit.pop() {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM icons WHERE owner_id = ? AND parent_id = ?",
                    ICON_COLUMNS
                ))
                .map_err(|e| DomainError::Internal(e.to_string()))?;

            let rows = stmt
                .query_map(params![owner, current], row_to_icon)
                .map_err(|e| DomainError::Internal(e.to_string()))?;

            for row in rows {
                let icon = row.map_err(|e| DomainError::Internal(e.to_string()))?;
                to_visit.push(icon.id);
                result.push(icon);
            }
        }

        Ok(result)
    }

    async fn resolve_parent_folder(&self, owner: UserId, parent_id: IconId) -> DomainResult<Icon> {
        let conn = self.conn.lock().await;

        let parent = conn
            .query_row(
                &format!("SELECT {} FROM icons WHERE id = ? AND owner_id = ?", ICON_COLUMNS),
                params![parent_id, owner],
                row_to_icon,
            )
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .ok_or_else(|| {
                DomainError::Validation(format!("parent icon {} not found", parent_id))
            })?;

        if !parent.is_folder() {
            return Err(DomainError::Validation(format!(
                "parent icon {} is not a folder",
                parent_id
            )));
        }
        Ok(parent)
    }

    async fn would_create_cycle(
        &self,
        owner: UserId,
        id: IconId,
        new_parent_id: IconId,
    ) -> DomainResult<bool> {
        let conn = self.conn.lock().await;

        let mut current = Some(new_parent_id);
        while let Some(ancestor) = current {
            if ancestor == id {
                return Ok(true);
            }
            current = conn
                .query_row(
                    "SELECT parent_id FROM icons WHERE id = ? AND owner_id = ?",
                    params![ancestor, owner],
                    |row| row.get::<_, Option<IconId>>(0),
                )
                .optional()
                .map_err(|e| DomainError::Internal(e.to_string()))?
                .flatten();
        }
        Ok(false)
    }
}
