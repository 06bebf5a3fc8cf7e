use std::path::PathBuf;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tera::Tera;
use tower_cookies::CookieManagerLayer;
use tower_http::{compression::CompressionLayer, services::ServeDir};

use crate::{api, error::AppError, AppState};

pub fn generate_routes(
    pool: SqlitePool,
    templates: Tera,
    session_secret: &str,
    media_root: PathBuf,
) -> Router {
    let media_dir = media_root.clone();
    let state = AppState::new(pool, templates, session_secret, media_root);

    Router::new()
        // ==== FEEDS ==== //
        .route("/", get(api::feed::index))
        .route("/follow/", get(api::feed::follow_index))
        .route("/group/:slug/", get(api::feed::group_posts))
        // ==== PROFILES ==== //
        .route("/profile/:username/", get(api::feed::profile))
        .route("/profile/:username/follow/", get(api::follows::profile_follow))
        .route(
            "/profile/:username/unfollow/",
            get(api::follows::profile_unfollow),
        )
        // ==== POSTS ==== //
        .route(
            "/create/",
            get(api::posts::post_create_form).post(api::posts::post_create),
        )
        .route("/posts/:id/", get(api::posts::post_detail))
        .route(
            "/posts/:id/edit/",
            get(api::posts::post_edit_form).post(api::posts::post_edit),
        )
        .route("/posts/:id/comment/", post(api::comments::add_comment))
        // ==== ACCOUNTS ==== //
        .route(
            "/auth/signup/",
            get(api::auth::signup_form).post(api::auth::signup),
        )
        .route(
            "/auth/login/",
            get(api::auth::login_form).post(api::auth::login),
        )
        .route("/auth/logout/", get(api::auth::logout))
        // ==== STATIC PAGES ==== //
        .route("/about/author/", get(api::pages::about_author))
        .route("/about/tech/", get(api::pages::about_tech))
        .nest_service("/media", ServeDir::new(media_dir))
        .fallback(handler_404)
        .with_state(state)
        .layer(CookieManagerLayer::new())
        .layer(CompressionLayer::new())
}

async fn handler_404() -> impl IntoResponse {
    AppError::NotFound
}
