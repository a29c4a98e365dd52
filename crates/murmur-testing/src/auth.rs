//! Session helpers for router tests.
//!
//! Signs a real session token with the test secret so requests pass through the same
//! `Session` extractor production traffic does.

use axum::http::{HeaderName, HeaderValue, header};
use uuid::Uuid;

use murmur_auth_types::cookie::MURMUR_SESSION;
use murmur_auth_types::token::issue_session_token;

/// Secret shared by router tests and the test `AppState`.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockSession {
    pub account_id: Uuid,
    pub username: String,
}

impl MockSession {
    pub fn new(account_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
        }
    }

    /// Return a `Cookie` header carrying a session signed with [`TEST_SESSION_SECRET`].
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let (token, _) = issue_session_token(self.account_id, &self.username, TEST_SESSION_SECRET)
            .expect("sign test session token");
        let value = HeaderValue::from_str(&format!("{MURMUR_SESSION}={token}"))
            .expect("session cookie is a valid header value");
        (header::COOKIE, value)
    }
}
