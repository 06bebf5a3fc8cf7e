use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::DecodingKey;
use sqlx::SqlitePool;
use tower_cookies::Cookies;

use crate::{
    db::{self, User},
    utils::jwt,
    AppState,
};

pub const SESSION_COOKIE: &str = "quill_session";

/// Authenticated identity, threaded explicitly into every handler that
/// needs one. Anonymous requests are redirected to the login page with a
/// `next` parameter preserving the original destination.
#[derive(Debug)]
pub struct AuthUser(pub User);

/// Like [`AuthUser`] but anonymous viewers are allowed through.
#[derive(Debug)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let Some(cookie) = cookies.get(SESSION_COOKIE) else {
            return Ok(MaybeUser(None));
        };

        let pool = SqlitePool::from_ref(state);
        let key = DecodingKey::from_ref(state);

        // A stale or tampered cookie means an anonymous viewer, not an error.
        let user = match jwt::verify_token(cookie.value(), &key) {
            Ok(user_id) => db::get_user(&pool, user_id).await.ok(),
            Err(_) => None,
        };

        Ok(MaybeUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let next = parts.uri.path().to_owned();
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;

        match user {
            Some(user) => Ok(AuthUser(user)),
            None => Err(Redirect::to(&format!("/auth/login/?next={next}")).into_response()),
        }
    }
}
