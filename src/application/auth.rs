//! Admin credential check and in-memory session registry.
//!
//! One configured admin account. Passwords are compared as SHA-256 digests
//! in constant time; sessions are opaque tokens whose hashes live in a
//! [`DashMap`] with a fixed TTL, so a restart logs everyone out.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing or expired session")]
    Unauthenticated,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    expires_at: OffsetDateTime,
}

pub struct AdminAuthService {
    admin_email: String,
    admin_password_sha256: Vec<u8>,
    session_ttl: Duration,
    sessions: DashMap<[u8; 32], SessionEntry>,
}

impl AdminAuthService {
    /// `password_sha256_hex` is the lowercase hex digest of the admin
    /// password, validated at configuration load time.
    pub fn new(admin_email: String, password_sha256_hex: &str, session_ttl: Duration) -> Self {
        let admin_password_sha256 = hex::decode(password_sha256_hex).unwrap_or_default();
        Self {
            admin_email,
            admin_password_sha256,
            session_ttl,
            sessions: DashMap::new(),
        }
    }

    /// Verify credentials and mint a session token for the cookie.
    pub fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let digest = Self::hash(password);
        let email_ok = email.as_bytes().ct_eq(self.admin_email.as_bytes());
        let password_ok = digest.as_slice().ct_eq(&self.admin_password_sha256);
        if (email_ok & password_ok).unwrap_u8() == 0 {
            return Err(AuthError::InvalidCredentials);
        }

        // Drop sessions that expired without being presented again, so the
        // registry does not grow with every stale login.
        let now = OffsetDateTime::now_utc();
        self.sessions.retain(|_, entry| entry.expires_at > now);

        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            Self::hash(&token),
            SessionEntry {
                expires_at: now + self.session_ttl,
            },
        );
        Ok(token)
    }

    pub fn authenticate(&self, token: &str) -> Result<(), AuthError> {
        let key = Self::hash(token);
        let entry = self.sessions.get(&key).ok_or(AuthError::Unauthenticated)?;
        if entry.expires_at <= OffsetDateTime::now_utc() {
            drop(entry);
            self.sessions.remove(&key);
            return Err(AuthError::Unauthenticated);
        }
        Ok(())
    }

    pub fn logout(&self, token: &str) {
        self.sessions.remove(&Self::hash(token));
    }

    fn hash(input: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AdminAuthService {
        // sha256("correct horse")
        let digest = hex::encode(Sha256::digest(b"correct horse"));
        AdminAuthService::new("admin@example.com".into(), &digest, Duration::minutes(30))
    }

    #[test]
    fn login_with_valid_credentials_mints_a_session() {
        let auth = service();
        let token = auth.login("admin@example.com", "correct horse").unwrap();
        assert!(auth.authenticate(&token).is_ok());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let auth = service();
        assert!(matches!(
            auth.login("admin@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn wrong_email_is_rejected() {
        let auth = service();
        assert!(matches!(
            auth.login("intruder@example.com", "correct horse"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn logout_invalidates_the_session() {
        let auth = service();
        let token = auth.login("admin@example.com", "correct horse").unwrap();
        auth.logout(&token);
        assert!(matches!(
            auth.authenticate(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn expired_sessions_are_rejected() {
        let digest = hex::encode(Sha256::digest(b"correct horse"));
        let auth = AdminAuthService::new(
            "admin@example.com".into(),
            &digest,
            Duration::minutes(-1),
        );
        let token = auth.login("admin@example.com", "correct horse").unwrap();
        assert!(matches!(
            auth.authenticate(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn stale_sessions_are_swept_on_login() {
        let digest = hex::encode(Sha256::digest(b"correct horse"));
        let auth = AdminAuthService::new(
            "admin@example.com".into(),
            &digest,
            Duration::minutes(-1),
        );
        for _ in 0..3 {
            auth.login("admin@example.com", "correct horse").unwrap();
        }
        // Each login sweeps the previous, already expired entry.
        assert_eq!(auth.sessions.len(), 1);
    }
}
