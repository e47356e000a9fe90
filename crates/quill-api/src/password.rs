//! Argon2id credential hashing. Plaintext passwords never leave this module's
//! callers; only PHC-format hash strings are stored.

use anyhow::{Result, anyhow};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow!("password hashing failed: {e}"))
}

/// False on mismatch or a malformed stored hash; never panics.
pub fn verify(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_roundtrip() {
        let h = hash("pw1").unwrap();
        assert!(verify(&h, "pw1"));
        assert!(!verify(&h, "pw2"));
    }

    #[test]
    fn salts_are_random() {
        assert_ne!(hash("pw1").unwrap(), hash("pw1").unwrap());
    }

    #[test]
    fn malformed_hash_verifies_false() {
        assert!(!verify("not-a-phc-string", "pw1"));
        assert!(!verify("", "pw1"));
    }
}
