use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub type AppResult<T> = std::result::Result<T, AppError>;

const NOT_FOUND_PAGE: &str = include_str!("../templates/404.html.tera");

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Any error: {0:?}")]
    Anyhow(#[from] anyhow::Error),

    #[error("Not Found")]
    NotFound,

    #[error("SQL failed: {0:?}")]
    Sqlx(#[from] sqlx::Error),

    #[error("JWT error: {0:?}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("template error: {0:?}")]
    Template(#[from] tera::Error),

    #[error("multipart error: {0:?}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),
}

// Tell axum how to convert `AppError` into a response. Missing resources get
// the themed 404 page, the rest is a plain 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound | AppError::Sqlx(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
            }
            other => {
                tracing::error!("request failed: {other:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
