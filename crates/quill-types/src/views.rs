use serde::Serialize;

/// A post joined with its author's username, shaped for rendering.
/// `created` stays in SQLite's `datetime('now')` text form — the templates
/// display it verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: String,
    pub image: Option<String>,
    pub author: String,
}

/// A comment joined with its author's username.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub content: String,
    pub created: String,
    pub post_id: i64,
    pub author: String,
}
