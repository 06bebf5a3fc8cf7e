pub mod auth;
pub mod comments;
pub mod feed;
pub mod follows;
pub mod pages;
pub mod posts;

use axum::response::Html;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::error::AppResult;

pub(crate) fn render(templates: &Tera, name: &str, ctx: &Context) -> AppResult<Html<String>> {
    Ok(Html(templates.render(name, ctx)?))
}

/// `?page=N` for feed views. Unparsable values fall back to page 1; the
/// paginator clamps the rest.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub(crate) fn number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|page| page.parse().ok())
            .unwrap_or(1)
    }
}
