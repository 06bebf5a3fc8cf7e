use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use jsonwebtoken::EncodingKey;
use serde::Deserialize;
use sqlx::SqlitePool;
use tera::{Context, Tera};
use tower_cookies::{Cookie, Cookies};
use validator::Validate;

use crate::{
    api::render,
    db,
    error::AppResult,
    utils::{auth::SESSION_COOKIE, hasher, jwt},
};

pub const ALREADY_REGISTERED_ERROR: &str = "User is already registered";
pub const BAD_CREDENTIALS_ERROR: &str = "Please enter a correct username and password";

#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(
        length(min = 1, message = "user name can't be blank"),
        length(max = 64, message = "too long user name")
    )]
    username: String,

    #[validate(
        email(message = "invalid email address"),
        length(max = 64, message = "too long email address")
    )]
    email: String,

    #[validate(
        length(min = 8, message = "password must be at least 8 characters long"),
        length(max = 64, message = "too long password")
    )]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextParams {
    next: Option<String>,
}

// Only same-site paths are safe redirect targets after login.
fn safe_next(next: Option<String>) -> String {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next,
        _ => "/".to_owned(),
    }
}

fn set_session(cookies: &Cookies, token: String) {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);
}

fn first_error(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flatten()
        .filter_map(|err| err.message.as_ref())
        .map(ToString::to_string)
        .next()
        .unwrap_or_else(|| "Invalid input".to_owned())
}

// ==== SIGNUP ==== //

// GET /auth/signup/
pub async fn signup_form(State(templates): State<Tera>) -> AppResult<Html<String>> {
    render(&templates, "users/signup.html.tera", &Context::new())
}

// POST /auth/signup/
pub async fn signup(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    State(key): State<EncodingKey>,
    cookies: Cookies,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let rerender = |error: String| -> AppResult<Response> {
        let mut ctx = Context::new();
        ctx.insert("error", &error);
        ctx.insert("username", &form.username);
        ctx.insert("email", &form.email);
        Ok(render(&templates, "users/signup.html.tera", &ctx)?.into_response())
    };

    if let Err(errors) = form.validate() {
        return rerender(first_error(&errors));
    }

    let hash = hasher::hash_password(&form.password)?;
    let user = match db::create_user(&pool, &form.username, &form.email, &hash).await {
        Ok(user) => user,
        Err(_) => return rerender(ALREADY_REGISTERED_ERROR.to_owned()),
    };

    set_session(&cookies, jwt::generate_jwt(user.id, &key)?);
    Ok(Redirect::to("/").into_response())
}

// ==== LOGIN ==== //

// GET /auth/login/
pub async fn login_form(
    State(templates): State<Tera>,
    Query(params): Query<NextParams>,
) -> AppResult<Html<String>> {
    let mut ctx = Context::new();
    if let Some(next) = &params.next {
        ctx.insert("next", next);
    }
    render(&templates, "users/login.html.tera", &ctx)
}

// POST /auth/login/
pub async fn login(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    State(key): State<EncodingKey>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = db::find_user_by_username(&pool, &form.username).await?;

    match user {
        Some(user) if hasher::verify_password(&user.hash, &form.password)? => {
            set_session(&cookies, jwt::generate_jwt(user.id, &key)?);
            Ok(Redirect::to(&safe_next(form.next)).into_response())
        }
        _ => {
            let mut ctx = Context::new();
            ctx.insert("error", BAD_CREDENTIALS_ERROR);
            ctx.insert("username", &form.username);
            if let Some(next) = &form.next {
                ctx.insert("next", next);
            }
            Ok(render(&templates, "users/login.html.tera", &ctx)?.into_response())
        }
    }
}

// GET /auth/logout/
pub async fn logout(State(templates): State<Tera>, cookies: Cookies) -> AppResult<Html<String>> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);

    render(&templates, "users/logged_out.html.tera", &Context::new())
}
