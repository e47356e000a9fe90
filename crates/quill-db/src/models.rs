//! Database row types — these map directly to SQLite rows.
//! Distinct from the quill-types view models to keep the DB layer independent.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

/// A post joined with its author's username.
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: String,
    pub image: Option<String>,
    pub user_id: i64,
    pub author: String,
}

/// A comment joined with its author's username and owning post.
pub struct CommentRow {
    pub id: i64,
    pub content: String,
    pub created: String,
    pub post_id: i64,
    pub user_id: i64,
    pub author: String,
}
