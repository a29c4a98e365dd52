use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use validator::Validate;

use murmur_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use murmur_core::envelope::Envelope;

use crate::error::{AccountsServiceError, envelope_error};
use crate::handlers::extract::{ValidatedBody, ValidatedJson};
use crate::state::AppState;
use crate::usecase::session::{SignInInput, SignInUseCase};

// ── POST /sign-in ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address or username.
    #[validate(length(min = 1, message = "Email or username is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl ValidatedBody for SignInRequest {
    const FIELDS: &'static [&'static str] = &["identifier", "password"];
}

pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<SignInRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = SignInUseCase {
        accounts: state.account_repo(),
        hasher: state.password_hasher(),
        session_secret: state.session_key.as_str().to_owned(),
    };
    let out = usecase
        .execute(SignInInput {
            identifier: body.identifier,
            password: body.password,
        })
        .await
        .map_err(|e| e.context("Error signing in"))?;

    let jar = set_session_cookie(jar, out.token, state.cookie_secure);
    let body = Envelope::success(StatusCode::OK, "Signed in successfully")
        .with("username", out.username)
        .map_err(|e| envelope_error(e, "Error signing in"))?;
    Ok((jar, body))
}

// ── POST /sign-out ────────────────────────────────────────────────────────────

pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_secure);
    (jar, Envelope::success(StatusCode::OK, "Signed out successfully"))
}
