//! Post handlers: listing, search, detail, creation (with optional image
//! upload), and owner-or-admin deletion.

use askama::Template;
use axum::Extension;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, Redirect};
use tracing::info;

use quill_db::models::{CommentRow, PostRow};
use quill_types::forms::SearchQuery;
use quill_types::session::Session;
use quill_types::views::{CommentView, PostView};
use quill_ui::{CreateTemplate, IndexTemplate, PostTemplate};

use crate::error::{AppError, Result, join_error};
use crate::{AppState, media, sanitize, session};

pub(crate) fn post_view(row: PostRow) -> PostView {
    PostView {
        id: row.id,
        title: row.title,
        content: row.content,
        created: row.created,
        image: row.image,
        author: row.author,
    }
}

pub(crate) fn comment_view(row: CommentRow) -> CommentView {
    CommentView {
        id: row.id,
        content: row.content,
        created: row.created,
        post_id: row.post_id,
        author: row.author,
    }
}

pub async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_posts())
        .await
        .map_err(join_error)??;

    let html = IndexTemplate {
        posts: rows.into_iter().map(post_view).collect(),
        search_term: None,
        session,
    }
    .render()?;
    Ok(Html(html))
}

pub async fn search(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>> {
    let term = sanitize::clean(&query.search_term);

    let db = state.clone();
    let needle = term.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.search_posts(&needle))
        .await
        .map_err(join_error)??;

    let html = IndexTemplate {
        posts: rows.into_iter().map(post_view).collect(),
        search_term: Some(term),
        session,
    }
    .render()?;
    Ok(Html(html))
}

pub async fn view_post(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(post_id): Path<i64>,
) -> Result<Html<String>> {
    let db = state.clone();
    let (post, comments) = tokio::task::spawn_blocking(move || {
        let post = db.db.get_post(post_id)?;
        let comments = db.db.get_comments(post_id)?;
        Ok::<_, anyhow::Error>((post, comments))
    })
    .await
    .map_err(join_error)??;

    let post = post.ok_or(AppError::NotFound("Post"))?;

    let html = PostTemplate {
        post: post_view(post),
        comments: comments.into_iter().map(comment_view).collect(),
        session,
    }
    .render()?;
    Ok(Html(html))
}

pub async fn create_form(Extension(session): Extension<Session>) -> Result<Html<String>> {
    Ok(Html(CreateTemplate { session }.render()?))
}

/// Create a post from the multipart form. Any identity may post — an
/// anonymous request is attributed to the guest account. The image, when one
/// is attached and survives the media handler, lands in the same INSERT as
/// the post itself.
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    mut form: Multipart,
) -> Result<Redirect> {
    let mut title = String::new();
    let mut content = String::new();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = form
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed form: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("malformed form: {e}")))?;
            }
            Some("content") => {
                content = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("malformed form: {e}")))?;
            }
            Some("image") => {
                let filename = field.file_name().map(str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("malformed form: {e}")))?;
                if let Some(filename) = filename {
                    if !filename.is_empty() && !data.is_empty() {
                        upload = Some((filename, data.to_vec()));
                    }
                }
            }
            _ => {}
        }
    }

    let title = sanitize::clean(&title);
    let content = sanitize::clean(&content);

    let image = match upload {
        Some((filename, data)) => {
            media::store_upload(&state.config.images_dir, &filename, &data).await
        }
        None => None,
    };

    let db = state.clone();
    let owner = session.clone();
    let post_id = tokio::task::spawn_blocking(move || {
        let user_id = session::resolve_user_id(&db.db, &owner);
        db.db.create_post(&title, &content, user_id, image.as_deref())
    })
    .await
    .map_err(join_error)??;

    info!("created post {post_id}");
    Ok(Redirect::to("/"))
}

/// Delete a post, its comments, and its image file. Only the owning username
/// or an admin may do this; the comment cascade and the post delete share a
/// transaction, while the image removal is best-effort.
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(post_id): Path<i64>,
) -> Result<Redirect> {
    let db = state.clone();
    let post = tokio::task::spawn_blocking(move || db.db.get_post(post_id))
        .await
        .map_err(join_error)??
        .ok_or(AppError::NotFound("Post"))?;

    if !session.is_owner_or_admin(&post.author) {
        return Err(AppError::Forbidden("post"));
    }

    if let Some(image) = &post.image {
        media::delete_image(&state.config.images_dir, image).await;
    }

    let db = state.clone();
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_post(post_id))
        .await
        .map_err(join_error)??;
    if !deleted {
        // lost a race against another deleter; same outcome as "never existed"
        return Err(AppError::NotFound("Post"));
    }

    info!("deleted post {post_id}");
    Ok(Redirect::to("/"))
}
