use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Database;
use crate::models::{CommentRow, PostRow, UserRow};

const POST_COLUMNS: &str = "p.id, p.title, p.content, p.created, p.image, p.user_id, u.username";

impl Database {
    // -- Users --

    /// Insert a new user. Fails on a duplicate username (UNIQUE constraint).
    pub fn create_user(&self, username: &str, password_hash: &str, is_admin: bool) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password, is_admin) VALUES (?1, ?2, ?3)",
                params![username, password_hash, is_admin],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Insert the fixed `admin` (id 1) and `guest` (id 2) accounts if they
    /// are not present. The guest row backs the anonymous fallback identity.
    pub fn seed_default_users(&self, admin_hash: &str, guest_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO users (id, username, password, is_admin) VALUES (1, 'admin', ?1, 1)",
                [admin_hash],
            )?;
            conn.execute(
                "INSERT OR IGNORE INTO users (id, username, password, is_admin) VALUES (2, 'guest', ?1, 0)",
                [guest_hash],
            )?;
            Ok(())
        })
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare("SELECT id, username, password, is_admin FROM users WHERE username = ?1")?
                .query_row([username], map_user)
                .optional()?;
            Ok(row)
        })
    }

    pub fn find_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare("SELECT id, username, password, is_admin FROM users WHERE id = ?1")?
                .query_row([id], map_user)
                .optional()?;
            Ok(row)
        })
    }

    // -- Posts --

    pub fn list_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            query_posts(
                conn,
                &format!(
                    "SELECT {POST_COLUMNS} FROM posts p
                     JOIN users u ON p.user_id = u.id
                     ORDER BY p.created DESC, p.id DESC"
                ),
                params![],
            )
        })
    }

    /// Case-insensitive substring match on title or content. The term is
    /// bound as a parameter and wrapped in `%` inside SQL — user input never
    /// reaches the query text itself.
    pub fn search_posts(&self, term: &str) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            query_posts(
                conn,
                &format!(
                    "SELECT {POST_COLUMNS} FROM posts p
                     JOIN users u ON p.user_id = u.id
                     WHERE p.title LIKE '%' || ?1 || '%' OR p.content LIKE '%' || ?1 || '%'
                     ORDER BY p.created DESC, p.id DESC"
                ),
                params![term],
            )
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare(&format!(
                    "SELECT {POST_COLUMNS} FROM posts p
                     JOIN users u ON p.user_id = u.id
                     WHERE p.id = ?1"
                ))?
                .query_row([id], map_post)
                .optional()?;
            Ok(row)
        })
    }

    /// Insert a post. The optional image filename is part of the same INSERT,
    /// so a post row can never exist with a half-attached image reference.
    pub fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: i64,
        image: Option<&str>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (title, content, user_id, image) VALUES (?1, ?2, ?3, ?4)",
                params![title, content, user_id, image],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Delete a post and every comment referencing it in one transaction.
    /// Returns false when the post row was already gone (e.g. a concurrent
    /// delete won the race).
    pub fn delete_post(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM comments WHERE post_id = ?1", [id])?;
            let deleted = tx.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(deleted > 0)
        })
    }

    // -- Comments --

    pub fn get_comments(&self, post_id: i64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let rows = conn
                .prepare(
                    "SELECT c.id, c.content, c.created, c.post_id, c.user_id, u.username
                     FROM comments c
                     JOIN users u ON c.user_id = u.id
                     WHERE c.post_id = ?1
                     ORDER BY c.created DESC, c.id DESC",
                )?
                .query_map([post_id], map_comment)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_comment(&self, id: i64) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let row = conn
                .prepare(
                    "SELECT c.id, c.content, c.created, c.post_id, c.user_id, u.username
                     FROM comments c
                     JOIN users u ON c.user_id = u.id
                     WHERE c.id = ?1",
                )?
                .query_row([id], map_comment)
                .optional()?;
            Ok(row)
        })
    }

    pub fn create_comment(&self, content: &str, post_id: i64, user_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (content, post_id, user_id) VALUES (?1, ?2, ?3)",
                params![content, post_id, user_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn delete_comment(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        is_admin: row.get(3)?,
    })
}

fn map_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created: row.get(3)?,
        image: row.get(4)?,
        user_id: row.get(5)?,
        author: row.get(6)?,
    })
}

fn map_comment(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        content: row.get(1)?,
        created: row.get(2)?,
        post_id: row.get(3)?,
        user_id: row.get(4)?,
        author: row.get(5)?,
    })
}

fn query_posts(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<PostRow>> {
    let rows = conn
        .prepare(sql)?
        .query_map(params, map_post)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
