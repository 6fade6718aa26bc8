use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `users` table. `password` holds the encoded PBKDF2 hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Fields required to create a user; `password_hash` is already encoded.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}
