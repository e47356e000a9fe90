use serde::{Deserialize, Serialize};

/// Fixed fallback identity for unauthenticated actors. Points at the seeded
/// `guest` row. This is a convenience default, not a security boundary —
/// anyone can post as guest.
pub const GUEST_USER_ID: i64 = 2;

/// The identity attached to every request.
///
/// Decoded from the signed `session` cookie when one is present; otherwise
/// the anonymous default. Handlers receive this explicitly as a request
/// extension rather than reading ambient state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub username: Option<String>,
    pub is_admin: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: Some(username.into()),
            is_admin,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// True iff this session may delete a resource owned by `owner`.
    pub fn is_owner_or_admin(&self, owner: &str) -> bool {
        self.is_admin || self.username.as_deref() == Some(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_act_on_own_resource() {
        let session = Session::logged_in("alice", false);
        assert!(session.is_owner_or_admin("alice"));
        assert!(!session.is_owner_or_admin("bob"));
    }

    #[test]
    fn admin_may_act_on_any_resource() {
        let session = Session::logged_in("admin", true);
        assert!(session.is_owner_or_admin("alice"));
    }

    #[test]
    fn anonymous_may_act_on_nothing() {
        let session = Session::anonymous();
        assert!(!session.is_owner_or_admin("alice"));
        assert!(!session.is_authenticated());
    }
}
