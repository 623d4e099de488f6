//! # User Repository
//!
//! Minimal staff registry: the identities the ledger's `cashier_id` points
//! at, with their position (manager / cashier / admin).
//!
//! Credentials, sessions, and login flows belong to the auth layer in front
//! of this crate; nothing here stores a password. Duplicate usernames and
//! emails come back as `UniqueViolation` values for the caller to check,
//! not as panics or raised form errors.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tally_core::{Position, User};

const USER_COLUMNS: &str = "id, username, email, position, created_at";

/// Repository for staff identity operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a staff member.
    ///
    /// ## Errors
    /// * `UniqueViolation` - username or email already taken
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        position: Position,
    ) -> DbResult<User> {
        debug!(username, position = position.as_str(), "Creating user");

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (username, email, position, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(position)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(inserted.last_insert_rowid())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by username (login-by-name flows in the caller).
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::testutil::test_db;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = test_db().await;

        let user = db
            .users()
            .create("morgan", "morgan@example.com", Position::Manager)
            .await
            .unwrap();
        assert_eq!(user.username, "morgan");
        assert_eq!(user.position, Position::Manager);

        let by_id = db.users().get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "morgan@example.com");

        let by_name = db.users().get_by_username("morgan").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        assert!(db.users().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_value_not_a_panic() {
        let db = test_db().await;

        db.users()
            .create("casey", "casey@example.com", Position::Cashier)
            .await
            .unwrap();

        let err = db
            .users()
            .create("casey", "other@example.com", Position::Cashier)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = test_db().await;

        db.users()
            .create("casey", "shared@example.com", Position::Cashier)
            .await
            .unwrap();

        let err = db
            .users()
            .create("riley", "shared@example.com", Position::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
