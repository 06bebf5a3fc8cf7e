use axum::{
    extract::{Path, State},
    response::Redirect,
};
use sqlx::SqlitePool;

use crate::{db, error::AppResult, utils::auth::AuthUser};

// GET /profile/:username/follow/
pub async fn profile_follow(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
    AuthUser(user): AuthUser,
) -> AppResult<Redirect> {
    let author = db::get_user_by_username(&pool, &username).await?;

    // Following yourself is a silent no-op.
    if author.id != user.id {
        db::follow(&pool, user.id, author.id).await?;
    }

    Ok(Redirect::to(&format!("/profile/{username}/")))
}

// GET /profile/:username/unfollow/
pub async fn profile_unfollow(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
    AuthUser(user): AuthUser,
) -> AppResult<Redirect> {
    let author = db::get_user_by_username(&pool, &username).await?;

    db::unfollow(&pool, user.id, author.id).await?;

    Ok(Redirect::to(&format!("/profile/{username}/")))
}
