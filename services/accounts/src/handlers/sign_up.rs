use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use murmur_core::envelope::Envelope;
use murmur_domain::account::validate_username;

use crate::error::AccountsServiceError;
use crate::handlers::extract::{ValidatedBody, ValidatedJson, rule};
use crate::state::AppState;
use crate::usecase::register::{RegisterInput, RegisterUseCase};
use crate::usecase::username::CheckUsernameUseCase;

pub(crate) fn username_rule(username: &str) -> Result<(), ValidationError> {
    rule("username", validate_username(username))
}

// ── POST /sign-up ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(custom(function = "username_rule"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl ValidatedBody for SignUpRequest {
    const FIELDS: &'static [&'static str] = &["username", "email", "password"];
}

pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SignUpRequest>,
) -> Result<Envelope, AccountsServiceError> {
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
        hasher: state.password_hasher(),
        notifier: state.mailer.clone(),
    };
    usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(|e| e.context("Error registering user"))?;

    Ok(Envelope::success(
        StatusCode::CREATED,
        "User registered successfully. Please verify your account.",
    ))
}

// ── GET /check-username-unique ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckUsernameQuery {
    #[serde(default)]
    pub username: String,
}

pub async fn check_username_unique(
    State(state): State<AppState>,
    Query(query): Query<CheckUsernameQuery>,
) -> Result<Envelope, AccountsServiceError> {
    let usecase = CheckUsernameUseCase {
        accounts: state.account_repo(),
    };
    let available = usecase
        .execute(&query.username)
        .await
        .map_err(|e| e.context("Error checking username"))?;

    if !available {
        return Err(AccountsServiceError::UsernameTaken);
    }
    Ok(Envelope::success(StatusCode::OK, "Username is unique"))
}
