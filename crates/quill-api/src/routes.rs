//! Router assembly. The session layer wraps every route, so handlers can
//! always rely on a `Session` extension being present.

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::services::ServeDir;

use crate::{AppState, auth, comments, posts, session};

pub fn router(state: AppState) -> Router {
    let images = ServeDir::new(&state.config.images_dir);

    Router::new()
        .route("/", get(posts::index))
        .route("/create", get(posts::create_form).post(posts::create))
        .route("/delete_post/{post_id}", get(posts::delete_post))
        .route("/search", get(posts::search))
        .route("/post/{post_id}", get(posts::view_post))
        .route("/add_comment/{post_id}", post(comments::add_comment))
        .route("/delete_comment/{comment_id}", get(comments::delete_comment))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/register", get(auth::register_form).post(auth::register))
        .nest_service("/static/images", images)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::load_session,
        ))
        .with_state(state)
}
