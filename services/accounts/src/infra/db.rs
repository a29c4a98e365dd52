use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, SqlErr, Statement,
    sea_query::Expr,
};
use uuid::Uuid;

use murmur_accounts_schema::{accounts, messages};

use crate::domain::repository::{AccountRepository, MessageRepository};
use crate::domain::types::{Account, Message, PendingAccount, UpsertOutcome};
use crate::error::AccountsServiceError;

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

/// Insert, or overwrite the unverified row holding the same email. The `WHERE` on the
/// conflict branch turns a verified row into "no row returned".
const UPSERT_UNVERIFIED_SQL: &str = r#"
    INSERT INTO accounts (
        id, username, email, password_hash, verification_code, verification_code_expiry,
        is_verified, is_accepting_messages, created_at, updated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, FALSE, TRUE, $7, $7)
    ON CONFLICT (email) DO UPDATE SET
        username = EXCLUDED.username,
        password_hash = EXCLUDED.password_hash,
        verification_code = EXCLUDED.verification_code,
        verification_code_expiry = EXCLUDED.verification_code_expiry,
        updated_at = EXCLUDED.updated_at
    WHERE accounts.is_verified = FALSE
    RETURNING id
"#;

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_verified_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .filter(accounts::Column::IsVerified.eq(true))
            .one(&self.db)
            .await
            .context("find verified account by username")?;
        Ok(model.map(account_from_model))
    }

    async fn list_unverified_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Account>, AccountsServiceError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .filter(accounts::Column::IsVerified.eq(false))
            .order_by_desc(accounts::Column::UpdatedAt)
            .all(&self.db)
            .await
            .context("list unverified accounts by username")?;
        Ok(models.into_iter().map(account_from_model).collect())
    }

    async fn upsert_unverified(
        &self,
        pending: &PendingAccount,
    ) -> Result<UpsertOutcome, AccountsServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct UpsertRow {
            id: Uuid,
        }

        let row = UpsertRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            UPSERT_UNVERIFIED_SQL,
            [
                pending.id.into(),
                pending.username.clone().into(),
                pending.email.clone().into(),
                pending.password_hash.clone().into(),
                pending.verification_code.clone().into(),
                pending.verification_code_expiry.into(),
                pending.generated_at.into(),
            ],
        ))
        .one(&self.db)
        .await
        .context("upsert unverified account")?;

        Ok(match row {
            None => UpsertOutcome::EmailTaken,
            Some(UpsertRow { id }) if id == pending.id => UpsertOutcome::Created(id),
            Some(UpsertRow { id }) => UpsertOutcome::Refreshed(id),
        })
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::IsVerified, Expr::value(true))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(id))
            .filter(accounts::Column::IsVerified.eq(false))
            .exec(&self.db)
            .await;

        let result = match result {
            // idx_accounts_verified_username: someone else verified this username first
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AccountsServiceError::UsernameTaken);
            }
            other => other.context("mark account verified")?,
        };

        if result.rows_affected == 0 {
            return Err(AccountsServiceError::AlreadyVerified);
        }
        Ok(())
    }

    async fn set_accepting_messages(
        &self,
        id: Uuid,
        accepting: bool,
    ) -> Result<bool, AccountsServiceError> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::IsAcceptingMessages, Expr::value(accepting))
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set accepting messages")?;
        Ok(result.rows_affected > 0)
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        verification_code: model.verification_code,
        verification_code_expiry: model.verification_code_expiry,
        is_verified: model.is_verified,
        is_accepting_messages: model.is_accepting_messages,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Message repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMessageRepository {
    pub db: DatabaseConnection,
}

impl MessageRepository for DbMessageRepository {
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Message>, AccountsServiceError> {
        let models = messages::Entity::find()
            .filter(messages::Column::AccountId.eq(account_id))
            .order_by_desc(messages::Column::CreatedAt)
            .order_by_desc(messages::Column::Id)
            .all(&self.db)
            .await
            .context("list messages by account")?;
        Ok(models.into_iter().map(message_from_model).collect())
    }

    async fn create(&self, message: &Message) -> Result<(), AccountsServiceError> {
        messages::ActiveModel {
            id: Set(message.id),
            account_id: Set(message.account_id),
            content: Set(message.content.clone()),
            created_at: Set(message.created_at),
        }
        .insert(&self.db)
        .await
        .context("create message")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid, account_id: Uuid) -> Result<bool, AccountsServiceError> {
        let result = messages::Entity::delete_many()
            .filter(messages::Column::Id.eq(id))
            .filter(messages::Column::AccountId.eq(account_id))
            .exec(&self.db)
            .await
            .context("delete message")?;
        Ok(result.rows_affected > 0)
    }
}

fn message_from_model(model: messages::Model) -> Message {
    Message {
        id: model.id,
        account_id: model.account_id,
        content: model.content,
        created_at: model.created_at,
    }
}
