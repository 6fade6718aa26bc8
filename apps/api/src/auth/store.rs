//! Storage seams for the auth service: a user store keyed by unique name and
//! email, and a set of revoked tokens.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::user::{NewUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

pub trait RevocationStore: Send + Sync {
    fn is_revoked(&self, token: &str) -> bool;
    fn revoke(&self, token: &str);
}

pub struct SqlxUserStore {
    pool: SqlitePool,
}

impl SqlxUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqlxUserStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, phone, password FROM users WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, phone, password FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, password)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, email, phone, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_user_error)?;
        Ok(created)
    }
}

/// A `UNIQUE` violation on `users.name` or `users.email` is a duplicate
/// signup (400), not a database failure.
fn duplicate_user_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            if db.message().contains("users.name") {
                return AppError::Validation("Name already exists".to_string());
            }
            if db.message().contains("users.email") {
                return AppError::Validation("Email already exists".to_string());
            }
        }
    }
    AppError::Database(err)
}

/// In-process revocation set. No eviction: revoked tokens stay until restart.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    tokens: RwLock<HashSet<String>>,
}

impl RevocationStore for InMemoryRevocationStore {
    fn is_revoked(&self, token: &str) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(token)
    }

    fn revoke(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(token.to_string());
    }
}
