use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use murmur_core::envelope::Envelope;
use murmur_domain::account::validate_verification_code;

use crate::error::AccountsServiceError;
use crate::handlers::extract::{ValidatedBody, ValidatedJson, rule};
use crate::handlers::sign_up::username_rule;
use crate::state::AppState;
use crate::usecase::verify::{VerifyAccountInput, VerifyAccountUseCase};

fn code_rule(code: &str) -> Result<(), ValidationError> {
    rule("code", validate_verification_code(code))
}

#[derive(Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(custom(function = "username_rule"))]
    pub username: String,
    #[validate(custom(function = "code_rule"))]
    pub code: String,
}

impl ValidatedBody for VerifyCodeRequest {
    const FIELDS: &'static [&'static str] = &["username", "code"];
}

pub async fn verify_code(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<VerifyCodeRequest>,
) -> Result<Envelope, AccountsServiceError> {
    let usecase = VerifyAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(VerifyAccountInput {
            username: body.username,
            code: body.code,
        })
        .await
        .map_err(|e| e.context("Error verifying user"))?;

    Ok(Envelope::success(
        StatusCode::OK,
        "Account verified successfully",
    ))
}
