use anyhow::Context;
use uuid::Uuid;

use murmur_auth_types::token::issue_session_token;

use crate::domain::repository::{AccountRepository, PasswordHasher};
use crate::error::AccountsServiceError;

pub struct SignInInput {
    /// Email address or username.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub account_id: Uuid,
    pub username: String,
    pub token: String,
}

pub struct SignInUseCase<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    pub accounts: A,
    pub hasher: H,
    pub session_secret: String,
}

impl<A, H> SignInUseCase<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutput, AccountsServiceError> {
        // 1. Email first, then the verified owner of the username
        let account = match self.accounts.find_by_email(&input.identifier).await? {
            Some(account) => account,
            None => self
                .accounts
                .find_verified_by_username(&input.identifier)
                .await?
                .ok_or(AccountsServiceError::UnknownIdentifier)?,
        };

        if !account.is_verified {
            return Err(AccountsServiceError::NotVerified);
        }

        if !self
            .hasher
            .verify(&input.password, &account.password_hash)
            .await?
        {
            return Err(AccountsServiceError::IncorrectPassword);
        }

        let (token, _exp) =
            issue_session_token(account.id, &account.username, &self.session_secret)
                .context("failed to sign session token")?;

        Ok(SignInOutput {
            account_id: account.id,
            username: account.username,
            token,
        })
    }
}
