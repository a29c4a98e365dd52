//! Account field rules.
//!
//! The request schema enforces these at the HTTP boundary; use cases re-check them so a
//! malformed input that bypasses the schema fails with a validation error.

use validator::ValidateEmail;

/// Username length bounds in characters (inclusive).
pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 20;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Verification codes are exactly this many ASCII digits.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Inclusive numeric range of a verification code.
pub const VERIFICATION_CODE_MIN: u32 = 100_000;
pub const VERIFICATION_CODE_MAX: u32 = 999_999;

/// A field that failed an account rule. `Display` is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccountRuleViolation {
    #[error("Username must be at least 2 characters")]
    UsernameTooShort,
    #[error("Username must be no more than 20 characters")]
    UsernameTooLong,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Verification code must be 6 digits")]
    InvalidVerificationCode,
}

pub fn validate_username(username: &str) -> Result<(), AccountRuleViolation> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN {
        return Err(AccountRuleViolation::UsernameTooShort);
    }
    if len > USERNAME_MAX_LEN {
        return Err(AccountRuleViolation::UsernameTooLong);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AccountRuleViolation> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AccountRuleViolation::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), AccountRuleViolation> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AccountRuleViolation::PasswordTooShort);
    }
    Ok(())
}

/// Check the shape of a submitted code: six ASCII digits, no sign, no whitespace.
pub fn validate_verification_code(code: &str) -> Result<(), AccountRuleViolation> {
    if code.len() == VERIFICATION_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AccountRuleViolation::InvalidVerificationCode)
    }
}

/// Validate a full sign-up triple, reporting the first violation in field order.
pub fn validate_sign_up(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), AccountRuleViolation> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)
}
