use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tera::{Context, Tera};

use crate::{
    api::render,
    db::{self, Group},
    error::AppResult,
    utils::{
        auth::{AuthUser, MaybeUser},
        media,
    },
    MediaRoot,
};

pub const TEXT_REQUIRED_ERROR: &str = "Post text must not be empty";
pub const INVALID_GROUP_ERROR: &str = "Select a valid group";

/// Fields collected from the multipart post form.
#[derive(Debug, Default)]
struct PostForm {
    text: String,
    group: String,
    image: Option<(String, Vec<u8>)>,
}

impl PostForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            match field.name() {
                Some("text") => form.text = field.text().await?,
                Some("group") => form.group = field.text().await?,
                Some("image") => {
                    let filename = field.file_name().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    if let Some(filename) = filename {
                        if !bytes.is_empty() {
                            form.image = Some((filename, bytes.to_vec()));
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Resolves the submitted group choice. An empty selection is fine; a
    /// value that is not the id of an existing group is a form error.
    async fn resolve_group(&self, pool: &SqlitePool) -> AppResult<Result<Option<i64>, &'static str>> {
        if self.group.is_empty() {
            return Ok(Ok(None));
        }

        let Ok(group_id) = self.group.parse::<i64>() else {
            return Ok(Err(INVALID_GROUP_ERROR));
        };

        match db::find_group(pool, group_id).await? {
            Some(group) => Ok(Ok(Some(group.id))),
            None => Ok(Err(INVALID_GROUP_ERROR)),
        }
    }

    fn validate_text(&self) -> Result<(), &'static str> {
        if self.text.trim().is_empty() {
            Err(TEXT_REQUIRED_ERROR)
        } else {
            Ok(())
        }
    }
}

fn render_post_form(
    templates: &Tera,
    groups: &[Group],
    form: &PostForm,
    error: Option<&str>,
    edit_of: Option<i64>,
) -> AppResult<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("groups", groups);
    ctx.insert("text", &form.text);
    ctx.insert("group", &form.group);
    if let Some(error) = error {
        ctx.insert("error", error);
    }
    if let Some(post_id) = edit_of {
        ctx.insert("is_edit", &true);
        ctx.insert("post_id", &post_id);
    }

    render(templates, "create_post.html.tera", &ctx)
}

// GET /create/
pub async fn post_create_form(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    AuthUser(_user): AuthUser,
) -> AppResult<Html<String>> {
    let groups = db::list_groups(&pool).await?;
    render_post_form(&templates, &groups, &PostForm::default(), None, None)
}

// POST /create/
pub async fn post_create(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    State(MediaRoot(media_root)): State<MediaRoot>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = PostForm::read(multipart).await?;

    let group_id = match (form.validate_text(), form.resolve_group(&pool).await?) {
        (Ok(()), Ok(group_id)) => group_id,
        (text_result, group_result) => {
            let error = text_result.err().or(group_result.err());
            let groups = db::list_groups(&pool).await?;
            return Ok(render_post_form(&templates, &groups, &form, error, None)?.into_response());
        }
    };

    let image = match &form.image {
        Some((filename, bytes)) => Some(media::save_upload(&media_root, filename, bytes).await?),
        None => None,
    };

    db::create_post(&pool, &form.text, user.id, group_id, image.as_deref()).await?;

    Ok(Redirect::to(&format!("/profile/{}/", user.username)).into_response())
}

// GET /posts/:id/
pub async fn post_detail(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    Path(post_id): Path<i64>,
    MaybeUser(viewer): MaybeUser,
) -> AppResult<Html<String>> {
    let post = db::get_post(&pool, post_id).await?;
    let comments = db::list_comments_for_post(&pool, post.id).await?;
    let posts_count = db::count_posts_by_author(&pool, post.author_id).await?;
    let is_author = viewer.map(|v| v.id == post.author_id).unwrap_or(false);

    let mut ctx = Context::new();
    ctx.insert("title", &format!("Post: {}", post.text));
    ctx.insert("post", &post);
    ctx.insert("posts_count", &posts_count);
    ctx.insert("is_author", &is_author);
    ctx.insert("comments", &comments);

    render(&templates, "post_detail.html.tera", &ctx)
}

// GET /posts/:id/edit/
pub async fn post_edit_form(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    Path(post_id): Path<i64>,
    AuthUser(user): AuthUser,
) -> AppResult<Response> {
    let post = db::get_post(&pool, post_id).await?;
    if post.author_id != user.id {
        return Ok(Redirect::to(&format!("/posts/{post_id}/")).into_response());
    }

    let groups = db::list_groups(&pool).await?;
    let form = PostForm {
        text: post.text,
        group: post.group_id.map(|id| id.to_string()).unwrap_or_default(),
        image: None,
    };

    Ok(render_post_form(&templates, &groups, &form, None, Some(post_id))?.into_response())
}

// POST /posts/:id/edit/
pub async fn post_edit(
    State(pool): State<SqlitePool>,
    State(templates): State<Tera>,
    State(MediaRoot(media_root)): State<MediaRoot>,
    Path(post_id): Path<i64>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> AppResult<Response> {
    let post = db::get_post(&pool, post_id).await?;
    if post.author_id != user.id {
        return Ok(Redirect::to(&format!("/posts/{post_id}/")).into_response());
    }

    let form = PostForm::read(multipart).await?;

    let group_id = match (form.validate_text(), form.resolve_group(&pool).await?) {
        (Ok(()), Ok(group_id)) => group_id,
        (text_result, group_result) => {
            let error = text_result.err().or(group_result.err());
            let groups = db::list_groups(&pool).await?;
            return Ok(
                render_post_form(&templates, &groups, &form, error, Some(post_id))?
                    .into_response(),
            );
        }
    };

    // A fresh upload replaces the stored image; otherwise it is kept as is.
    let image = match &form.image {
        Some((filename, bytes)) => Some(media::save_upload(&media_root, filename, bytes).await?),
        None => None,
    };

    db::update_post(&pool, post_id, &form.text, group_id, image.as_deref()).await?;

    Ok(Redirect::to(&format!("/posts/{post_id}/")).into_response())
}
