use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{db, error::AppResult, utils::auth::AuthUser};

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    text: String,
}

// POST /posts/:id/comment/
//
// Empty text silently returns to the post page without creating anything;
// anonymous submissions never get this far (the extractor redirects to login).
pub async fn add_comment(
    State(pool): State<SqlitePool>,
    Path(post_id): Path<i64>,
    AuthUser(user): AuthUser,
    Form(form): Form<CommentForm>,
) -> AppResult<Redirect> {
    let post = db::get_post(&pool, post_id).await?;

    if !form.text.trim().is_empty() {
        db::create_comment(&pool, post.id, user.id, &form.text).await?;
    }

    Ok(Redirect::to(&format!("/posts/{post_id}/")))
}
