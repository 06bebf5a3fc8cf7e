use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppError, AppResult};

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub hash: String,
}

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, hash) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &SqlitePool, user_id: UserId) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    user.ok_or(AppError::NotFound)
}

pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> AppResult<User> {
    let user = find_user_by_username(pool, username).await?;
    user.ok_or(AppError::NotFound)
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
