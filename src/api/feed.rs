use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use sqlx::SqlitePool;
use tera::{Context, Tera};

use crate::{
    api::{render, PageParams},
    db,
    error::AppResult,
    utils::auth::{AuthUser, MaybeUser},
};

// GET /
pub async fn index(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    Query(params): Query<PageParams>,
) -> AppResult<Html<String>> {
    let page = db::list_posts_page(&pool, params.number()).await?;

    let mut ctx = Context::new();
    ctx.insert("title", "Latest updates");
    ctx.insert("page_obj", &page);

    render(&templates, "index.html.tera", &ctx)
}

// GET /group/:slug/
pub async fn group_posts(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Html<String>> {
    let group = db::get_group_by_slug(&pool, &slug).await?;
    let page = db::group_posts_page(&pool, group.id, params.number()).await?;

    let mut ctx = Context::new();
    ctx.insert("group", &group);
    ctx.insert("page_obj", &page);

    render(&templates, "group_list.html.tera", &ctx)
}

// GET /profile/:username/
pub async fn profile(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
    MaybeUser(viewer): MaybeUser,
) -> AppResult<Html<String>> {
    let author = db::get_user_by_username(&pool, &username).await?;
    let page = db::author_posts_page(&pool, author.id, params.number()).await?;

    let mut ctx = Context::new();
    ctx.insert("author", &author);
    ctx.insert("page_obj", &page);

    // Follow status only makes sense for an authenticated viewer looking at
    // somebody else's profile.
    if let Some(viewer) = viewer {
        if viewer.id != author.id {
            let following = db::is_following(&pool, viewer.id, author.id).await?;
            ctx.insert("following", &following);
        }
    }

    render(&templates, "profile.html.tera", &ctx)
}

// GET /follow/
pub async fn follow_index(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    Query(params): Query<PageParams>,
    AuthUser(user): AuthUser,
) -> AppResult<Html<String>> {
    let page = db::feed_posts_page(&pool, user.id, params.number()).await?;

    let mut ctx = Context::new();
    ctx.insert("title", "Your subscriptions");
    ctx.insert("page_obj", &page);

    render(&templates, "follow.html.tera", &ctx)
}
