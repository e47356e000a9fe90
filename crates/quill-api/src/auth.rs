//! Registration, login, and logout.
//!
//! Form-level problems (bad username, taken username, password mismatch,
//! wrong credentials) re-render the form with an inline message instead of
//! surfacing an error status.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::info;

use quill_types::forms::{LoginForm, RegisterForm};
use quill_types::session::Session;
use quill_ui::{LoginTemplate, RegisterTemplate};

use crate::error::{Result, join_error};
use crate::{AppState, password, sanitize, session};

const BAD_CREDENTIALS: &str = "Incorrect username or password. Please try again.";
const BAD_USERNAME: &str = "Username contains invalid characters. Please try again.";
const USERNAME_TAKEN: &str = "Username already exists. Please choose a different username.";
const PASSWORD_MISMATCH: &str = "Passwords do not match. Please try again.";

fn login_page(error: Option<&str>) -> Result<Html<String>> {
    let html = LoginTemplate {
        error: error.map(str::to_owned),
        session: Session::anonymous(),
    }
    .render()?;
    Ok(Html(html))
}

fn register_page(error: Option<&str>) -> Result<Html<String>> {
    let html = RegisterTemplate {
        error: error.map(str::to_owned),
        session: Session::anonymous(),
    }
    .render()?;
    Ok(Html(html))
}

pub async fn login_form() -> Result<Html<String>> {
    login_page(None)
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let db = state.clone();
    let username = form.username.clone();
    let user = tokio::task::spawn_blocking(move || db.db.find_user_by_username(&username))
        .await
        .map_err(join_error)??;

    let Some(user) = user else {
        return Ok(login_page(Some(BAD_CREDENTIALS))?.into_response());
    };
    if !password::verify(&user.password, &form.password) {
        return Ok(login_page(Some(BAD_CREDENTIALS))?.into_response());
    }

    let cookie = session::issue_cookie(&state.config.session_secret, &user.username, user.is_admin)?;
    info!("user '{}' logged in", user.username);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

pub async fn logout() -> Response {
    ([(header::SET_COOKIE, session::clear_cookie())], Redirect::to("/")).into_response()
}

pub async fn register_form() -> Result<Html<String>> {
    register_page(None)
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    // a username that does not survive the sanitizer unchanged contains markup
    if sanitize::clean(&form.username) != form.username {
        return Ok(register_page(Some(BAD_USERNAME))?.into_response());
    }

    let db = state.clone();
    let username = form.username.clone();
    let existing = tokio::task::spawn_blocking(move || db.db.find_user_by_username(&username))
        .await
        .map_err(join_error)??;

    if existing.is_some() {
        return Ok(register_page(Some(USERNAME_TAKEN))?.into_response());
    }
    if form.password != form.confirm_password {
        return Ok(register_page(Some(PASSWORD_MISMATCH))?.into_response());
    }

    let password_hash = password::hash(&form.password)?;
    let db = state.clone();
    let username = form.username.clone();
    tokio::task::spawn_blocking(move || db.db.create_user(&username, &password_hash, false))
        .await
        .map_err(join_error)??;

    info!("registered user '{}'", form.username);
    Ok(Redirect::to("/login").into_response())
}
