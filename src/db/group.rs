use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

// Groups are created by administrators (deploy tooling, seeds), not over HTTP.
pub async fn create_group(
    pool: &SqlitePool,
    title: &str,
    description: &str,
) -> AppResult<Group> {
    let slug = slug::slugify(title);

    let group = sqlx::query_as::<_, Group>(
        "INSERT INTO post_groups (title, slug, description) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(title)
    .bind(&slug)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(group)
}

pub async fn get_group_by_slug(pool: &SqlitePool, slug: &str) -> AppResult<Group> {
    let group = sqlx::query_as::<_, Group>("SELECT * FROM post_groups WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    group.ok_or(AppError::NotFound)
}

pub async fn find_group(pool: &SqlitePool, group_id: i64) -> AppResult<Option<Group>> {
    let group = sqlx::query_as::<_, Group>("SELECT * FROM post_groups WHERE id = ?")
        .bind(group_id)
        .fetch_optional(pool)
        .await?;

    Ok(group)
}

pub async fn list_groups(pool: &SqlitePool) -> AppResult<Vec<Group>> {
    let groups = sqlx::query_as::<_, Group>("SELECT * FROM post_groups ORDER BY title")
        .fetch_all(pool)
        .await?;

    Ok(groups)
}
