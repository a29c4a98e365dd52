use murmur_domain::account::validate_username;

use crate::domain::repository::AccountRepository;
use crate::error::AccountsServiceError;

/// Interactive availability check. Not authoritative: registration re-checks, and only
/// verification is guarded by the store.
pub struct CheckUsernameUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> CheckUsernameUseCase<A> {
    /// `Ok(true)` if no verified account holds `username`.
    pub async fn execute(&self, username: &str) -> Result<bool, AccountsServiceError> {
        validate_username(username).map_err(|v| AccountsServiceError::Validation(v.to_string()))?;
        let taken = self
            .accounts
            .find_verified_by_username(username)
            .await?
            .is_some();
        Ok(!taken)
    }
}
