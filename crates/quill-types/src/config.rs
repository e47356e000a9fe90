use std::path::PathBuf;

use anyhow::Result;

/// Immutable startup configuration, read once from the environment and
/// passed into the application state. No component reads env vars after boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub images_dir: PathBuf,
    pub session_secret: String,
    pub host: String,
    pub port: u16,
    pub admin_password: String,
    pub guest_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let db_path = std::env::var("QUILL_DB_PATH")
            .unwrap_or_else(|_| "quill.db".into())
            .into();
        let images_dir = std::env::var("QUILL_IMAGES_DIR")
            .unwrap_or_else(|_| "static/images".into())
            .into();
        let session_secret =
            std::env::var("QUILL_SESSION_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        let host = std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("QUILL_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()?;
        let admin_password =
            std::env::var("QUILL_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());
        let guest_password =
            std::env::var("QUILL_GUEST_PASSWORD").unwrap_or_else(|_| "guestaccount".into());

        Ok(Self {
            db_path,
            images_dir,
            session_secret,
            host,
            port,
            admin_password,
            guest_password,
        })
    }
}
