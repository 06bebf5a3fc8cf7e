use axum::{extract::State, response::Html};
use tera::{Context, Tera};

use crate::{api::render, error::AppResult};

// GET /about/author/
pub async fn about_author(State(templates): State<Tera>) -> AppResult<Html<String>> {
    render(&templates, "about/author.html.tera", &Context::new())
}

// GET /about/tech/
pub async fn about_tech(State(templates): State<Tera>) -> AppResult<Html<String>> {
    render(&templates, "about/tech.html.tera", &Context::new())
}
