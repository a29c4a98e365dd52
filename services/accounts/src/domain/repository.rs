#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Account, Message, PendingAccount, UpsertOutcome};
use crate::error::AccountsServiceError;

/// Repository for account records.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError>;

    /// The verified account holding `username`, if any (at most one exists).
    async fn find_verified_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountsServiceError>;

    /// Unverified accounts holding `username`, most recently refreshed first.
    async fn list_unverified_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Account>, AccountsServiceError>;

    /// Insert a new unverified account, or overwrite the unverified account with the same
    /// email in one atomic conditional write. Writes nothing if a verified account holds
    /// the email.
    async fn upsert_unverified(
        &self,
        pending: &PendingAccount,
    ) -> Result<UpsertOutcome, AccountsServiceError>;

    /// Flip `is_verified` to true. Returns `UsernameTaken` if another verified account
    /// already owns the username.
    async fn mark_verified(&self, id: Uuid) -> Result<(), AccountsServiceError>;

    /// Set the acceptance flag. Returns `false` if the account does not exist.
    async fn set_accepting_messages(
        &self,
        id: Uuid,
        accepting: bool,
    ) -> Result<bool, AccountsServiceError>;
}

/// Repository for received messages.
pub trait MessageRepository: Send + Sync {
    /// Messages owned by the account, newest first.
    async fn list_by_account(&self, account_id: Uuid)
    -> Result<Vec<Message>, AccountsServiceError>;

    async fn create(&self, message: &Message) -> Result<(), AccountsServiceError>;

    /// Delete a message owned by `account_id`. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<bool, AccountsServiceError>;
}

/// Delivers a verification code out-of-band.
///
/// Failures are reported as `NotificationFailed` carrying a user-facing message.
pub trait VerificationNotifier: Send + Sync {
    async fn send(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// One-way password hash oracle.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, AccountsServiceError>;

    /// `Ok(false)` on mismatch; `Err` only if `hash` is not a valid hash string.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AccountsServiceError>;
}
