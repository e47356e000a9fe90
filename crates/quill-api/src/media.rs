//! Uploaded image handling: extension allow-list, filesystem-safe naming,
//! best-effort writes and deletes under the configured images directory.
//!
//! Storage failures never fail the enclosing request — a post simply ends up
//! without an image reference.

use std::path::Path;

use chrono::Utc;
use tokio::fs;
use tracing::{debug, warn};

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// True iff the filename has a dot and its lowercased suffix is an allowed
/// image extension.
pub fn is_allowed_extension(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a candidate filename to a filesystem-safe token: path separators
/// and other suspect characters become underscores, leading dots are
/// dropped. The result is always safe to join onto the images directory.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// `{stem}_{YYYYMMDDHHMMSS}.{ext}`, sanitized. The second-resolution
/// timestamp keeps repeated uploads of the same file from colliding.
fn stored_filename(original: &str) -> String {
    let (stem, ext) = original.rsplit_once('.').unwrap_or((original, ""));
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    sanitize_filename(&format!("{stem}_{timestamp}.{ext}"))
}

/// Write an upload under `images_dir` and return the stored filename, or
/// `None` when the extension is disallowed or the write fails. Failures are
/// logged and swallowed; the caller's transaction is unaffected.
pub async fn store_upload(images_dir: &Path, original: &str, data: &[u8]) -> Option<String> {
    if !is_allowed_extension(original) {
        debug!("rejecting upload '{original}': extension not allowed");
        return None;
    }

    let filename = stored_filename(original);
    if filename.is_empty() {
        debug!("rejecting upload '{original}': empty name after sanitizing");
        return None;
    }

    if let Err(e) = fs::create_dir_all(images_dir).await {
        warn!("cannot create images dir {}: {e}", images_dir.display());
        return None;
    }

    let target = images_dir.join(&filename);
    match fs::write(&target, data).await {
        Ok(()) => Some(filename),
        Err(e) => {
            warn!("error saving image file {filename}: {e}");
            None
        }
    }
}

/// Best-effort removal of a stored image. A missing file is not an error.
pub async fn delete_image(images_dir: &Path, filename: &str) {
    let target = images_dir.join(sanitize_filename(filename));
    match fs::remove_file(&target).await {
        Ok(()) => debug!("deleted image file {filename}"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("image file {filename} already gone")
        }
        Err(e) => warn!("error deleting image file {filename}: {e}"),
    }
}
