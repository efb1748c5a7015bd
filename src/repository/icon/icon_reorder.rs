//! Icon Reorder Coordinator
//!
//! Applies the position batch a client sends after a drag-and-drop: validate
//! the entries, check every referenced icon exists, check every one belongs
//! to the caller, then write all positions inside one transaction. Either
//! the whole batch lands or none of it does.

use std::collections::HashMap;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, IconId, ReorderEntry, ReorderedIcon, UserId};

/// Trait for batch reorder operations
#[async_trait]
pub trait IconReorderOperations {
    /// Preconditions, each a distinct failure, checked in order:
    /// 1. non-empty batch with non-negative positions (`Validation`)
    /// 2. every id exists (`NotFound`)
    /// 3. every icon belongs to `owner` (`Forbidden`, naming the id)
    ///
    /// Positions are applied exactly as given; the coordinator trusts the
    /// caller's permutation and does not deduplicate. Returns updated
    /// summaries in input order.
    async fn reorder(
        &self,
        owner: UserId,
        entries: &[ReorderEntry],
    ) -> DomainResult<Vec<ReorderedIcon>>;
}

#[async_trait]
impl IconReorderOperations for super::icon_repo::IconRepository {
    async fn reorder(
        &self,
        owner: UserId,
        entries: &[ReorderEntry],
    ) -> DomainResult<Vec<ReorderedIcon>> {
        if entries.is_empty() {
            return Err(DomainError::Validation("no icons to reorder".to_string()));
        }
        for entry in entries {
            if entry.position < 0 {
                return Err(DomainError::Validation(format!(
                    "position must be a non-negative integer for icon {}",
                    entry.id
                )));
            }
        }

        // Hold the lock across check and apply so no other write from this
        // process interleaves with the batch.
        let mut guard = self.conn.lock().await;

        let mut loaded: HashMap<IconId, (String, UserId)> = HashMap::new();
        for entry in entries {
            if loaded.contains_key(&entry.id) {
                continue;
            }
            let row = guard
                .query_row(
                    "SELECT title, owner_id FROM icons WHERE id = ?",
                    params![entry.id],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, UserId>(1)?)),
                )
                .optional()
                .map_err(|e| DomainError::Internal(e.to_string()))?;

            match row {
                Some(found) => {
                    loaded.insert(entry.id, found);
                }
                None => {
                    return Err(DomainError::NotFound(format!("icon {} not found", entry.id)));
                }
            }
        }

        for entry in entries {
            if let Some((_, icon_owner)) = loaded.get(&entry.id) {
                if *icon_owner != owner {
                    return Err(DomainError::Forbidden(format!(
                        "you don't own icon with id {}",
                        entry.id
                    )));
                }
            }
        }

        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let now = chrono::Utc::now().timestamp_millis();
        let mut updated = Vec::with_capacity(entries.len());
        for entry in entries {
            tx.execute(
                "UPDATE icons SET position = ?, updated_at = ? WHERE id = ?",
                params![entry.position, now, entry.id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

            let (title, _) = &loaded[&entry.id];
            updated.push(ReorderedIcon {
                id: entry.id,
                title: title.clone(),
                position: entry.position,
            });
        }

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        log::info!("reordered {} icons for user {}", entries.len(), owner);
        Ok(updated)
    }
}
