//! Cookie-backed `Session` extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use murmur_core::envelope::Envelope;

use crate::cookie::MURMUR_SESSION;
use crate::token::validate_session_token;

/// HMAC secret used to sign and validate session tokens.
///
/// Services expose it from their state through `FromRef`.
#[derive(Clone)]
pub struct SessionKey(Arc<str>);

impl SessionKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// The signed-in account owner, taken from the `murmur_session` cookie.
///
/// Rejects with 401 and the standard envelope when the cookie is absent or invalid.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: Uuid,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionRejection {
    #[error("session cookie missing")]
    Missing,
    #[error("session cookie invalid")]
    Invalid,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        Envelope::failure(StatusCode::UNAUTHORIZED, "Not authenticated").into_response()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionKey: FromRef<S>,
{
    type Rejection = SessionRejection;

    // Extract synchronously and return a 'static future so the returned future does not
    // borrow `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = SessionKey::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let result = match jar.get(MURMUR_SESSION) {
            None => Err(SessionRejection::Missing),
            Some(cookie) => validate_session_token(cookie.value(), key.as_str())
                .map_err(|_| SessionRejection::Invalid),
        };

        async move {
            let info = result?;
            Ok(Self {
                account_id: info.account_id,
                username: info.username,
            })
        }
    }
}
