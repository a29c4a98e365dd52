use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use murmur_accounts::domain::repository::{
    AccountRepository, MessageRepository, PasswordHasher, VerificationNotifier,
};
use murmur_accounts::domain::types::{Account, Message, PendingAccount, UpsertOutcome};
use murmur_accounts::error::AccountsServiceError;

// ── MockAccountRepo ──────────────────────────────────────────────────────────

/// In-memory store with the same uniqueness rules as the database: one row per email,
/// one verified row per username.
#[derive(Clone, Default)]
pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the internal account list for post-execution inspection.
    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_verified_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.is_verified && a.username == username)
            .cloned())
    }

    async fn list_unverified_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Account>, AccountsServiceError> {
        let mut found: Vec<Account> = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| !a.is_verified && a.username == username)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(found)
    }

    async fn upsert_unverified(
        &self,
        pending: &PendingAccount,
    ) -> Result<UpsertOutcome, AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.email == pending.email) {
            Some(existing) if existing.is_verified => Ok(UpsertOutcome::EmailTaken),
            Some(existing) => {
                existing.username = pending.username.clone();
                existing.password_hash = pending.password_hash.clone();
                existing.verification_code = pending.verification_code.clone();
                existing.verification_code_expiry = pending.verification_code_expiry;
                existing.updated_at = pending.generated_at;
                Ok(UpsertOutcome::Refreshed(existing.id))
            }
            None => {
                accounts.push(Account {
                    id: pending.id,
                    username: pending.username.clone(),
                    email: pending.email.clone(),
                    password_hash: pending.password_hash.clone(),
                    verification_code: pending.verification_code.clone(),
                    verification_code_expiry: pending.verification_code_expiry,
                    is_verified: false,
                    is_accepting_messages: true,
                    created_at: pending.generated_at,
                    updated_at: pending.generated_at,
                });
                Ok(UpsertOutcome::Created(pending.id))
            }
        }
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        let username = accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.username.clone())
            .ok_or(AccountsServiceError::AccountNotFound)?;
        if accounts
            .iter()
            .any(|a| a.id != id && a.is_verified && a.username == username)
        {
            return Err(AccountsServiceError::UsernameTaken);
        }
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AccountsServiceError::AccountNotFound)?;
        if account.is_verified {
            return Err(AccountsServiceError::AlreadyVerified);
        }
        account.is_verified = true;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn set_accepting_messages(
        &self,
        id: Uuid,
        accepting: bool,
    ) -> Result<bool, AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.is_accepting_messages = accepting;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockMessageRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMessageRepo {
    pub messages: Arc<Mutex<Vec<Message>>>,
}

impl MockMessageRepo {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(messages)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn messages_handle(&self) -> Arc<Mutex<Vec<Message>>> {
        Arc::clone(&self.messages)
    }
}

impl MessageRepository for MockMessageRepo {
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Message>, AccountsServiceError> {
        let mut found: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.account_id == account_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn create(&self, message: &Message) -> Result<(), AccountsServiceError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<bool, AccountsServiceError> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| !(m.id == id && m.account_id == account_id));
        Ok(messages.len() < before)
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub email: String,
    pub username: String,
    pub code: String,
}

/// Records every send; fails with the configured message when set.
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<SentCode>>>,
    pub failure: Option<String>,
}

impl MockNotifier {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(message.to_owned()),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentCode>>> {
        Arc::clone(&self.sent)
    }
}

impl VerificationNotifier for MockNotifier {
    async fn send(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        self.sent.lock().unwrap().push(SentCode {
            email: email.to_owned(),
            username: username.to_owned(),
            code: code.to_owned(),
        });
        match &self.failure {
            Some(message) => Err(AccountsServiceError::NotificationFailed(message.clone())),
            None => Ok(()),
        }
    }
}

// ── FakeHasher ───────────────────────────────────────────────────────────────

/// Salted like a real hash (`fake$<n>$<password>`) so repeated hashes differ.
#[derive(Clone, Default)]
pub struct FakeHasher {
    counter: Arc<AtomicU64>,
}

impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &str) -> Result<String, AccountsServiceError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(format!("fake${n}${password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AccountsServiceError> {
        let mut parts = hash.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("fake"), Some(_), Some(stored)) => Ok(stored == password),
            _ => Err(AccountsServiceError::Internal(anyhow::anyhow!(
                "malformed fake hash"
            ))),
        }
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "hunter22";

pub fn verified_account(username: &str, email: &str) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: email.to_owned(),
        password_hash: format!("fake$0${TEST_PASSWORD}"),
        verification_code: "123456".to_owned(),
        verification_code_expiry: now + Duration::hours(1),
        is_verified: true,
        is_accepting_messages: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn unverified_account(username: &str, email: &str, code: &str) -> Account {
    Account {
        is_verified: false,
        verification_code: code.to_owned(),
        ..verified_account(username, email)
    }
}

pub fn message_for(account_id: Uuid, content: &str, age_secs: i64) -> Message {
    Message {
        id: Uuid::now_v7(),
        account_id,
        content: content.to_owned(),
        created_at: Utc::now() - Duration::seconds(age_secs),
    }
}
