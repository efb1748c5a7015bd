//! Icon Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Icon CRUD, always scoped to the owning
//! user. Specialized operations live in separate modules:
//! - icon_hierarchy: parent/children queries, cycle checks, descendants
//! - icon_positioning: position allocation
//! - icon_reorder: batch position updates

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::super::db::SharedConnection;
use super::super::traits::OwnedRepository;
use crate::domain::{DomainError, DomainResult, Icon, IconId, IconKind, UserId};

pub(super) const ICON_COLUMNS: &str = "id, title, kind, url, image_file, material_icon_name, \
     background_color, parent_id, position, owner_id, image_size, created_at, updated_at";

/// SQLite implementation of the Icon repository
pub struct IconRepository {
    pub(super) conn: SharedConnection,
}

impl IconRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Replace the stored image reference. Returns `NotFound` when the icon
    /// does not exist for this owner; the caller handles file cleanup.
    pub async fn set_image(
        &self,
        owner: UserId,
        id: IconId,
        filename: &str,
        size: i64,
    ) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let affected = conn
            .execute(
                "UPDATE icons SET image_file = ?, image_size = ?, updated_at = ? \
                 WHERE id = ? AND owner_id = ?",
                params![filename, size, chrono::Utc::now().timestamp_millis(), id, owner],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("icon {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl OwnedRepository<Icon> for IconRepository {
    async fn create(&self, owner: UserId, entity: &Icon) -> DomainResult<Icon> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO icons (title, kind, url, image_file, material_icon_name, \
             background_color, parent_id, position, owner_id, image_size, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.title,
                entity.kind.as_str(),
                entity.url,
                entity.image_file,
                entity.material_icon_name,
                entity.background_color,
                entity.parent_id,
                entity.position,
                owner,
                entity.image_size,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid();
        created.owner_id = owner;
        created.created_at = Some(now);
        created.updated_at = Some(now);
        Ok(created)
    }

    async fn find_by_id(&self, owner: UserId, id: IconId) -> DomainResult<Option<Icon>> {
        let conn = self.conn.lock().await;

        conn.query_row(
            &format!("SELECT {} FROM icons WHERE id = ? AND owner_id = ?", ICON_COLUMNS),
            params![id, owner],
            row_to_icon,
        )
        .optional()
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self, owner: UserId) -> DomainResult<Vec<Icon>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM icons WHERE owner_id = ? \
                 ORDER BY parent_id IS NOT NULL, parent_id, position",
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

    async fn update(&self, owner: UserId, entity: &Icon) -> DomainResult<Icon> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        let affected = conn
            .execute(
                "UPDATE icons SET title = ?, kind = ?, url = ?, material_icon_name = ?, \
                 background_color = ?, parent_id = ?, position = ?, updated_at = ? \
                 WHERE id = ? AND owner_id = ?",
                params![
                    entity.title,
                    entity.kind.as_str(),
                    entity.url,
                    entity.material_icon_name,
                    entity.background_color,
                    entity.parent_id,
                    entity.position,
                    now,
                    entity.id,
                    owner
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("icon {} not found", entity.id)));
        }

        let mut updated = entity.clone();
        updated.updated_at = Some(now);
        Ok(updated)
    }

    async fn delete(&self, owner: UserId, id: IconId) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;

        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let exists: Option<IconId> = tx
            .query_row(
                "SELECT id FROM icons WHERE id = ? AND owner_id = ?",
                params![id, owner],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if exists.is_none() {
            return Err(DomainError::NotFound(format!("icon {} not found", id)));
        }

        // Cascade: the whole subtree goes in one statement. Children always
        // share their parent's owner, so the walk stays inside this user's
        // tree.
        tx.execute(
            "DELETE FROM icons WHERE id IN (
                WITH RECURSIVE subtree AS (
                    SELECT id FROM icons WHERE id = ?
                    UNION ALL
                    SELECT i.id FROM icons i
                    JOIN subtree s ON i.parent_id = s.id
                )
                SELECT id FROM subtree
            )",
            params![id],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to Icon
pub(super) fn row_to_icon(row: &rusqlite::Row) -> rusqlite::Result<Icon> {
    Ok(Icon {
        id: row.get(0)?,
        title: row.get(1)?,
        kind: IconKind::from_str(&row.get::<_, String>(2)?),
        url: row.get(3)?,
        image_file: row.get(4)?,
        material_icon_name: row.get(5)?,
        background_color: row.get(6)?,
        parent_id: row.get(7)?,
        position: row.get(8)?,
        owner_id: row.get(9)?,
        image_size: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}
