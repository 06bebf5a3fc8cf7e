use sqlx::SqlitePool;

use crate::error::AppResult;

use super::UserId;

/// Create-if-absent: following an author twice leaves a single row.
pub async fn follow(pool: &SqlitePool, user_id: UserId, author_id: UserId) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO follows (user_id, author_id)
         VALUES (?, ?)
         ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Deleting a relationship that does not exist is a no-op.
pub async fn unfollow(pool: &SqlitePool, user_id: UserId, author_id: UserId) -> AppResult<()> {
    sqlx::query("DELETE FROM follows WHERE user_id = ? AND author_id = ?")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn is_following(
    pool: &SqlitePool,
    user_id: UserId,
    author_id: UserId,
) -> AppResult<bool> {
    let following = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM follows WHERE user_id = ? AND author_id = ?)",
    )
    .bind(user_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(following)
}
