//! Signed cookie sessions.
//!
//! The `session` cookie carries an HS256 token with the username and admin
//! flag. `load_session` decodes it for every request and inserts a
//! [`Session`] extension; handlers never touch the cookie directly.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use quill_db::Database;
use quill_types::session::{GUEST_USER_ID, Session};

use crate::AppState;
use crate::error::Result;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    is_admin: bool,
    exp: usize,
}

/// Build the `Set-Cookie` value issued on login. 30-day expiry.
pub fn issue_cookie(secret: &str, username: &str, is_admin: bool) -> Result<String> {
    let claims = SessionClaims {
        sub: username.to_string(),
        is_admin,
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| crate::error::AppError::Internal(format!("session encoding failed: {e}")))?;
    Ok(format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

/// The `Set-Cookie` value that clears the session on logout.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

fn decode_session(secret: &str, token: &str) -> Option<Session> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    Some(Session::logged_in(data.claims.sub, data.claims.is_admin))
}

fn session_from_cookie_header(secret: &str, header_value: &str) -> Option<Session> {
    header_value
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, token)| decode_session(secret, token))
}

/// Non-mandatory session layer: an absent, expired, or tampered cookie
/// yields the anonymous session rather than a rejection.
pub async fn load_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let session = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| session_from_cookie_header(&state.config.session_secret, cookies))
        .unwrap_or_else(Session::anonymous);

    req.extensions_mut().insert(session);
    next.run(req).await
}

/// Map the session to a user id for attribution of writes. Unknown or absent
/// usernames fall back to the seeded guest account — a convenience default
/// carried over from the source system, not an authorization decision.
pub fn resolve_user_id(db: &Database, session: &Session) -> i64 {
    if let Some(username) = &session.username {
        match db.find_user_by_username(username) {
            Ok(Some(user)) => return user.id,
            Ok(None) => warn!("session user '{username}' missing from store, using guest"),
            Err(e) => warn!("user lookup failed for '{username}': {e:#}"),
        }
    }
    GUEST_USER_ID
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn cookie_token(cookie: &str) -> &str {
        cookie
            .strip_prefix("session=")
            .unwrap()
            .split(';')
            .next()
            .unwrap()
    }

    #[test]
    fn issue_and_decode_roundtrip() {
        let cookie = issue_cookie(SECRET, "alice", false).unwrap();
        let session =
            session_from_cookie_header(SECRET, &format!("theme=dark; {cookie}")).unwrap();
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert!(!session.is_admin);
    }

    #[test]
    fn admin_flag_survives_the_cookie() {
        let cookie = issue_cookie(SECRET, "admin", true).unwrap();
        let session = session_from_cookie_header(SECRET, &cookie).unwrap();
        assert!(session.is_admin);
    }

    #[test]
    fn tampered_token_is_anonymous() {
        let cookie = issue_cookie(SECRET, "alice", false).unwrap();
        let mut token = cookie_token(&cookie).to_string();
        token.push('x');
        assert!(decode_session(SECRET, &token).is_none());
        assert!(decode_session("other-secret", cookie_token(&cookie)).is_none());
    }

    #[test]
    fn unknown_session_user_falls_back_to_guest() {
        let db = Database::open_in_memory().unwrap();
        db.seed_default_users("a", "g").unwrap();

        // Guest fallback is attribution only — it grants no ownership rights.
        let anonymous = Session::anonymous();
        assert_eq!(resolve_user_id(&db, &anonymous), GUEST_USER_ID);

        let ghost = Session::logged_in("nobody", false);
        assert_eq!(resolve_user_id(&db, &ghost), GUEST_USER_ID);

        let admin = Session::logged_in("admin", true);
        assert_eq!(resolve_user_id(&db, &admin), 1);
    }
}
