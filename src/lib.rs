pub mod api;
pub mod db;
pub mod error;
pub mod routes;
pub mod utils;

use std::path::PathBuf;

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};
use sqlx::SqlitePool;
use tera::Tera;

pub use routes::generate_routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub templates: Tera,
    pub media_root: PathBuf,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AppState {
    pub fn new(pool: SqlitePool, templates: Tera, session_secret: &str, media_root: PathBuf) -> Self {
        Self {
            pool,
            templates,
            media_root,
            encoding_key: EncodingKey::from_secret(session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(session_secret.as_bytes()),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> SqlitePool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Tera {
    fn from_ref(app_state: &AppState) -> Tera {
        app_state.templates.clone()
    }
}

impl FromRef<AppState> for EncodingKey {
    fn from_ref(app_state: &AppState) -> EncodingKey {
        app_state.encoding_key.clone()
    }
}

impl FromRef<AppState> for DecodingKey {
    fn from_ref(app_state: &AppState) -> DecodingKey {
        app_state.decoding_key.clone()
    }
}

/// Directory uploaded post images are written to, served under `/media`.
#[derive(Clone)]
pub struct MediaRoot(pub PathBuf);

impl FromRef<AppState> for MediaRoot {
    fn from_ref(app_state: &AppState) -> MediaRoot {
        MediaRoot(app_state.media_root.clone())
    }
}
