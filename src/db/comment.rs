use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::AppResult;

use super::UserId;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
    pub author_id: UserId,
    pub author_username: String,
    pub post_id: i64,
}

pub async fn create_comment(
    pool: &SqlitePool,
    post_id: i64,
    author_id: UserId,
    text: &str,
) -> AppResult<Comment> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO comments (text, created, author_id, post_id)
         VALUES (?, ?, ?, ?)
         RETURNING id",
    )
    .bind(text)
    .bind(Utc::now())
    .bind(author_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    let comment = sqlx::query_as::<_, Comment>(
        "SELECT comments.id, comments.text, comments.created, comments.author_id,
                users.username AS author_username, comments.post_id
         FROM comments
         JOIN users ON users.id = comments.author_id
         WHERE comments.id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub async fn list_comments_for_post(pool: &SqlitePool, post_id: i64) -> AppResult<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT comments.id, comments.text, comments.created, comments.author_id,
                users.username AS author_username, comments.post_id
         FROM comments
         JOIN users ON users.id = comments.author_id
         WHERE comments.post_id = ?
         ORDER BY comments.created, comments.id",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
