use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registration record owned by the accounts service.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verification_code: String,
    pub verification_code_expiry: DateTime<Utc>,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    pub created_at: DateTime<Utc>,
    /// Generation time of the current verification code.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn code_expired(&self, now: DateTime<Utc>) -> bool {
        self.verification_code_expiry <= now
    }
}

/// Fields written by a sign-up attempt.
///
/// `id` is used only if no record exists for `email`; a refreshed record keeps its own id.
#[derive(Debug, Clone)]
pub struct PendingAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verification_code: String,
    pub verification_code_expiry: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
}

/// Result of the atomic sign-up write keyed by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record existed; a new unverified account was inserted.
    Created(Uuid),
    /// An unverified record existed and was overwritten in place.
    Refreshed(Uuid),
    /// A verified record holds the email; nothing was written.
    EmailTaken,
}

/// Anonymous message received by an account.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub account_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Verification code time-to-live in seconds.
pub const VERIFICATION_CODE_TTL_SECS: i64 = 3600;
