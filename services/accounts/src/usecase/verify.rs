use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use murmur_domain::account::validate_verification_code;

use crate::domain::repository::AccountRepository;
use crate::error::AccountsServiceError;

pub struct VerifyAccountInput {
    pub username: String,
    pub code: String,
}

pub struct VerifyAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> VerifyAccountUseCase<A> {
    /// Returns the id of the account that became verified.
    pub async fn execute(&self, input: VerifyAccountInput) -> Result<Uuid, AccountsServiceError> {
        validate_verification_code(&input.code)
            .map_err(|v| AccountsServiceError::Validation(v.to_string()))?;

        // Several unverified records may share a username (one per email).
        let candidates = self
            .accounts
            .list_unverified_by_username(&input.username)
            .await?;

        let Some(newest) = candidates.first() else {
            return match self
                .accounts
                .find_verified_by_username(&input.username)
                .await?
            {
                Some(_) => Err(AccountsServiceError::AlreadyVerified),
                None => Err(AccountsServiceError::AccountNotFound),
            };
        };

        let now = Utc::now();
        let Some(account) = candidates
            .iter()
            .find(|a| a.verification_code == input.code)
        else {
            // Expiry wins over a wrong code so the user is told to sign up again.
            if newest.code_expired(now) {
                return Err(AccountsServiceError::CodeExpired);
            }
            return Err(AccountsServiceError::IncorrectCode);
        };

        if account.code_expired(now) {
            return Err(AccountsServiceError::CodeExpired);
        }

        self.accounts.mark_verified(account.id).await?;
        info!(account_id = %account.id, "account verified");
        Ok(account.id)
    }
}
