#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use jsonwebtoken::EncodingKey;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;
use tera::Tera;
use tower::ServiceExt;

use quill::{
    db::{self, User},
    utils::{auth::SESSION_COOKIE, hasher, jwt},
};

pub const TEST_SECRET: &str = "test-session-secret";
pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    _media: TempDir,
}

pub async fn test_app() -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::prepare_db(&pool).await.unwrap();

    let templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
    let media = TempDir::new().unwrap();
    let app = quill::generate_routes(
        pool.clone(),
        templates,
        TEST_SECRET,
        media.path().to_path_buf(),
    );

    TestApp {
        app,
        pool,
        _media: media,
    }
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
    let hash = hasher::hash_password(TEST_PASSWORD).unwrap();
    db::create_user(pool, username, &format!("{username}@example.com"), &hash)
        .await
        .unwrap()
}

pub fn session_cookie(user: &User) -> String {
    let key = EncodingKey::from_secret(TEST_SECRET.as_bytes());
    let token = jwt::generate_jwt(user.id, &key).unwrap();
    format!("{SESSION_COOKIE}={token}")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn assert_redirect_to(&self, target: &str) {
        assert!(
            self.status.is_redirection(),
            "expected redirect, got {} with body {:?}",
            self.status,
            self.body
        );
        assert_eq!(self.location.as_deref(), Some(target));
    }

    pub fn article_count(&self) -> usize {
        self.body.matches("<article").count()
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(request).await.unwrap();

    let status = res.status();
    let location = res
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();

    TestResponse {
        status,
        location,
        set_cookie,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    form: &str,
) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::from(form.to_owned())).unwrap()).await
}

const BOUNDARY: &str = "X-TEST-BOUNDARY";

pub async fn post_multipart(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    fields: &[(&str, &str)],
) -> TestResponse {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
