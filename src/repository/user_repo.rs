//! User Repository
//!
//! Account rows only: identity for ownership scoping and registration
//! uniqueness. Credentials are out of scope.

use rusqlite::{params, OptionalExtension};

use super::db::SharedConnection;
use crate::domain::{DomainError, DomainResult, User, UserId};

pub struct UserRepository {
    conn: SharedConnection,
}

impl UserRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Insert a new account. A duplicate email is a `Conflict`.
    pub async fn create(&self, email: &str, display_name: &str) -> DomainResult<User> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO users (email, display_name, created_at) VALUES (?, ?, ?)",
            params![email, display_name, now],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(format!("email {} is already registered", email))
            }
            other => DomainError::Internal(other.to_string()),
        })?;

        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            created_at: Some(now),
        })
    }

    pub async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;

        conn.query_row(
            "SELECT id, email, display_name, created_at FROM users WHERE id = ?",
            params![id],
            row_to_user,
        )
        .optional()
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let conn = self.conn.lock().await;

        conn.query_row(
            "SELECT id, email, display_name, created_at FROM users WHERE email = ?",
            params![email],
            row_to_user,
        )
        .optional()
        .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        display_name: row.get(2)?,
        created_at: row.get(3)?,
    })
}
