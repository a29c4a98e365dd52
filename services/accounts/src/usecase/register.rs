use chrono::{Duration, Utc};
use rand::RngExt;
use tracing::info;
use uuid::Uuid;

use murmur_domain::account::{VERIFICATION_CODE_MAX, VERIFICATION_CODE_MIN, validate_sign_up};

use crate::domain::repository::{AccountRepository, PasswordHasher, VerificationNotifier};
use crate::domain::types::{PendingAccount, UpsertOutcome, VERIFICATION_CODE_TTL_SECS};
use crate::error::AccountsServiceError;

/// Uniform over 100000–999999, so always exactly six digits.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(VERIFICATION_CODE_MIN..=VERIFICATION_CODE_MAX)
        .to_string()
}

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutput {
    Created(Uuid),
    Refreshed(Uuid),
}

impl RegisterOutput {
    pub fn account_id(self) -> Uuid {
        match self {
            Self::Created(id) | Self::Refreshed(id) => id,
        }
    }
}

pub struct RegisterUseCase<A, H, N>
where
    A: AccountRepository,
    H: PasswordHasher,
    N: VerificationNotifier,
{
    pub accounts: A,
    pub hasher: H,
    pub notifier: N,
}

impl<A, H, N> RegisterUseCase<A, H, N>
where
    A: AccountRepository,
    H: PasswordHasher,
    N: VerificationNotifier,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, AccountsServiceError> {
        validate_sign_up(&input.username, &input.email, &input.password)
            .map_err(|v| AccountsServiceError::Validation(v.to_string()))?;

        // 1. Username first: a verified owner rejects regardless of email
        if self
            .accounts
            .find_verified_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AccountsServiceError::UsernameTaken);
        }

        // 2. Fresh hash + code + expiry for whichever branch the write takes
        let password_hash = self.hasher.hash(&input.password).await?;
        let code = generate_code();
        let now = Utc::now();
        let pending = PendingAccount {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash,
            verification_code: code,
            verification_code_expiry: now + Duration::seconds(VERIFICATION_CODE_TTL_SECS),
            generated_at: now,
        };

        // 3. Create, refresh-in-place, or reject on a verified email, atomically
        let output = match self.accounts.upsert_unverified(&pending).await? {
            UpsertOutcome::EmailTaken => return Err(AccountsServiceError::EmailTaken),
            UpsertOutcome::Created(id) => {
                info!(account_id = %id, "account created");
                RegisterOutput::Created(id)
            }
            UpsertOutcome::Refreshed(id) => {
                info!(account_id = %id, "unverified account refreshed");
                RegisterOutput::Refreshed(id)
            }
        };

        // 4. Notify. The write above stays even if this fails; signing up again with the
        //    same email takes the refresh branch.
        self.notifier
            .send(
                &pending.email,
                &pending.username,
                &pending.verification_code,
            )
            .await?;

        Ok(output)
    }
}
