use chrono::Utc;
use uuid::Uuid;

use murmur_domain::message::validate_content;

use crate::domain::repository::{AccountRepository, MessageRepository};
use crate::domain::types::Message;
use crate::error::AccountsServiceError;

// ── GetAcceptance ───────────────────────────────────────────────────────────

pub struct GetAcceptanceUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> GetAcceptanceUseCase<A> {
    pub async fn execute(&self, account_id: Uuid) -> Result<bool, AccountsServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;
        Ok(account.is_accepting_messages)
    }
}

// ── SetAcceptance ───────────────────────────────────────────────────────────

pub struct SetAcceptanceUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> SetAcceptanceUseCase<A> {
    /// Returns the flag as stored.
    pub async fn execute(
        &self,
        account_id: Uuid,
        accepting: bool,
    ) -> Result<bool, AccountsServiceError> {
        if !self
            .accounts
            .set_accepting_messages(account_id, accepting)
            .await?
        {
            return Err(AccountsServiceError::AccountNotFound);
        }
        Ok(accepting)
    }
}

// ── ListMessages ────────────────────────────────────────────────────────────

pub struct ListMessagesUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> ListMessagesUseCase<M> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Vec<Message>, AccountsServiceError> {
        self.messages.list_by_account(account_id).await
    }
}

// ── SendMessage ─────────────────────────────────────────────────────────────

pub struct SendMessageInput {
    pub username: String,
    pub content: String,
}

pub struct SendMessageUseCase<A, M>
where
    A: AccountRepository,
    M: MessageRepository,
{
    pub accounts: A,
    pub messages: M,
}

impl<A, M> SendMessageUseCase<A, M>
where
    A: AccountRepository,
    M: MessageRepository,
{
    pub async fn execute(&self, input: SendMessageInput) -> Result<Message, AccountsServiceError> {
        validate_content(&input.content)
            .map_err(|v| AccountsServiceError::Validation(v.to_string()))?;

        // Only verified owners receive messages
        let recipient = self
            .accounts
            .find_verified_by_username(&input.username)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        if !recipient.is_accepting_messages {
            return Err(AccountsServiceError::NotAcceptingMessages);
        }

        let message = Message {
            id: Uuid::now_v7(),
            account_id: recipient.id,
            content: input.content.trim().to_owned(),
            created_at: Utc::now(),
        };
        self.messages.create(&message).await?;
        Ok(message)
    }
}

// ── DeleteMessage ───────────────────────────────────────────────────────────

pub struct DeleteMessageUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> DeleteMessageUseCase<M> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        message_id: Uuid,
    ) -> Result<(), AccountsServiceError> {
        // Someone else's message looks the same as a missing one
        if !self.messages.delete(message_id, account_id).await? {
            return Err(AccountsServiceError::MessageNotFound);
        }
        Ok(())
    }
}
