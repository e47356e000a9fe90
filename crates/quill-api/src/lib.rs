pub mod auth;
pub mod comments;
pub mod error;
pub mod media;
pub mod password;
pub mod posts;
pub mod routes;
pub mod sanitize;
pub mod session;

use std::sync::Arc;

use quill_db::Database;
use quill_types::config::Config;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub config: Config,
}
