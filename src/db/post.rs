use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppError, AppResult};

use super::UserId;

pub const POSTS_PER_PAGE: i64 = 10;

const POST_COLUMNS: &str = "
    posts.id, posts.text, posts.created, posts.author_id,
    users.username AS author_username,
    posts.group_id, post_groups.title AS group_title,
    posts.image
";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
    pub author_id: UserId,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub image: Option<String>,
}

/// One page of a feed, newest posts first.
#[derive(Debug, Serialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub number: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PostPage {
    fn assemble(posts: Vec<Post>, pg: Pagination) -> Self {
        Self {
            posts,
            number: pg.number,
            num_pages: pg.num_pages,
            has_next: pg.number < pg.num_pages,
            has_prev: pg.number > 1,
        }
    }
}

/// Clamps a requested page number into the valid range for `total` items.
/// Out-of-range requests land on the nearest existing page instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pagination {
    number: i64,
    num_pages: i64,
    offset: i64,
}

impl Pagination {
    fn new(total: i64, requested: i64) -> Self {
        let num_pages = ((total + POSTS_PER_PAGE - 1) / POSTS_PER_PAGE).max(1);
        let number = requested.clamp(1, num_pages);
        Self {
            number,
            num_pages,
            offset: (number - 1) * POSTS_PER_PAGE,
        }
    }
}

fn page_sql(filter: &str) -> String {
    format!(
        "SELECT {POST_COLUMNS}
         FROM posts
         JOIN users ON users.id = posts.author_id
         LEFT JOIN post_groups ON post_groups.id = posts.group_id
         {filter}
         ORDER BY posts.created DESC, posts.id DESC
         LIMIT ? OFFSET ?"
    )
}

async fn count(pool: &SqlitePool, filter_sql: &str, bind: Option<i64>) -> AppResult<i64> {
    let query = format!("SELECT COUNT(*) FROM posts {filter_sql}");
    let mut q = sqlx::query_scalar::<_, i64>(&query);
    if let Some(value) = bind {
        q = q.bind(value);
    }
    Ok(q.fetch_one(pool).await?)
}

pub async fn list_posts_page(pool: &SqlitePool, requested: i64) -> AppResult<PostPage> {
    let total = count(pool, "", None).await?;
    let pg = Pagination::new(total, requested);

    let posts = sqlx::query_as::<_, Post>(&page_sql(""))
        .bind(POSTS_PER_PAGE)
        .bind(pg.offset)
        .fetch_all(pool)
        .await?;

    Ok(PostPage::assemble(posts, pg))
}

pub async fn group_posts_page(
    pool: &SqlitePool,
    group_id: i64,
    requested: i64,
) -> AppResult<PostPage> {
    let total = count(pool, "WHERE group_id = ?", Some(group_id)).await?;
    let pg = Pagination::new(total, requested);

    let posts = sqlx::query_as::<_, Post>(&page_sql("WHERE posts.group_id = ?"))
        .bind(group_id)
        .bind(POSTS_PER_PAGE)
        .bind(pg.offset)
        .fetch_all(pool)
        .await?;

    Ok(PostPage::assemble(posts, pg))
}

pub async fn author_posts_page(
    pool: &SqlitePool,
    author_id: UserId,
    requested: i64,
) -> AppResult<PostPage> {
    let total = count(pool, "WHERE author_id = ?", Some(author_id)).await?;
    let pg = Pagination::new(total, requested);

    let posts = sqlx::query_as::<_, Post>(&page_sql("WHERE posts.author_id = ?"))
        .bind(author_id)
        .bind(POSTS_PER_PAGE)
        .bind(pg.offset)
        .fetch_all(pool)
        .await?;

    Ok(PostPage::assemble(posts, pg))
}

/// Posts by authors the given user follows.
pub async fn feed_posts_page(
    pool: &SqlitePool,
    user_id: UserId,
    requested: i64,
) -> AppResult<PostPage> {
    const FILTER: &str =
        "WHERE posts.author_id IN (SELECT author_id FROM follows WHERE user_id = ?)";
    let total = count(
        pool,
        "WHERE author_id IN (SELECT author_id FROM follows WHERE user_id = ?)",
        Some(user_id),
    )
    .await?;
    let pg = Pagination::new(total, requested);

    let posts = sqlx::query_as::<_, Post>(&page_sql(FILTER))
        .bind(user_id)
        .bind(POSTS_PER_PAGE)
        .bind(pg.offset)
        .fetch_all(pool)
        .await?;

    Ok(PostPage::assemble(posts, pg))
}

pub async fn get_post(pool: &SqlitePool, post_id: i64) -> AppResult<Post> {
    let post = sqlx::query_as::<_, Post>(&page_sql("WHERE posts.id = ?"))
        .bind(post_id)
        .bind(1_i64)
        .bind(0_i64)
        .fetch_optional(pool)
        .await?;

    post.ok_or(AppError::NotFound)
}

pub async fn create_post(
    pool: &SqlitePool,
    text: &str,
    author_id: UserId,
    group_id: Option<i64>,
    image: Option<&str>,
) -> AppResult<Post> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO posts (text, created, author_id, group_id, image)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(text)
    .bind(Utc::now())
    .bind(author_id)
    .bind(group_id)
    .bind(image)
    .fetch_one(pool)
    .await?;

    get_post(pool, id).await
}

pub async fn update_post(
    pool: &SqlitePool,
    post_id: i64,
    text: &str,
    group_id: Option<i64>,
    image: Option<&str>,
) -> AppResult<()> {
    sqlx::query(
        "UPDATE posts
         SET text = ?, group_id = ?, image = COALESCE(?, image)
         WHERE id = ?",
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn count_posts_by_author(pool: &SqlitePool, author_id: UserId) -> AppResult<i64> {
    count(pool, "WHERE author_id = ?", Some(author_id)).await
}
