//! Comment handlers. Commenting is open to any resolved identity; deletion
//! is owner-or-admin only.

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;

use quill_types::forms::CommentForm;
use quill_types::session::Session;

use crate::error::{AppError, Result, join_error};
use crate::{AppState, sanitize, session};

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(post_id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect> {
    let content = sanitize::clean(&form.comment_content);

    let db = state.clone();
    let author = session.clone();
    let created = tokio::task::spawn_blocking(move || {
        // the post must exist; commenting on a deleted post is a 404, not a
        // foreign-key violation
        if db.db.get_post(post_id)?.is_none() {
            return Ok(None);
        }
        let user_id = session::resolve_user_id(&db.db, &author);
        db.db.create_comment(&content, post_id, user_id).map(Some)
    })
    .await
    .map_err(join_error)??;

    if created.is_none() {
        return Err(AppError::NotFound("Post"));
    }

    Ok(Redirect::to(&format!("/post/{post_id}")))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(comment_id): Path<i64>,
) -> Result<Redirect> {
    let db = state.clone();
    let comment = tokio::task::spawn_blocking(move || db.db.get_comment(comment_id))
        .await
        .map_err(join_error)??
        .ok_or(AppError::NotFound("Comment"))?;

    if !session.is_owner_or_admin(&comment.author) {
        return Err(AppError::Forbidden("comment"));
    }

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.delete_comment(comment_id))
        .await
        .map_err(join_error)??;

    Ok(Redirect::to(&format!("/post/{}", comment.post_id)))
}
