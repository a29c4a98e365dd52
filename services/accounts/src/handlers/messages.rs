use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use murmur_auth_types::session::Session;
use murmur_core::{envelope::Envelope, serde::to_rfc3339_ms};
use murmur_domain::message::validate_content;

use crate::domain::types::Message;
use crate::error::{AccountsServiceError, envelope_error};
use crate::handlers::extract::{ValidatedBody, ValidatedJson, rule};
use crate::handlers::sign_up::username_rule;
use crate::state::AppState;
use crate::usecase::inbox::{
    DeleteMessageUseCase, GetAcceptanceUseCase, ListMessagesUseCase, SendMessageInput,
    SendMessageUseCase, SetAcceptanceUseCase,
};

// ── GET /accept-messages ──────────────────────────────────────────────────────

pub async fn get_accept_messages(
    State(state): State<AppState>,
    session: Session,
) -> Result<Envelope, AccountsServiceError> {
    let usecase = GetAcceptanceUseCase {
        accounts: state.account_repo(),
    };
    let accepting = usecase
        .execute(session.account_id)
        .await
        .map_err(|e| e.context("Error retrieving message acceptance status"))?;

    Envelope::success(StatusCode::OK, "Message acceptance status fetched")
        .with("isAcceptingMessages", accepting)
        .map_err(|e| envelope_error(e, "Error retrieving message acceptance status"))
}

// ── POST /accept-messages ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesRequest {
    pub accept_messages: bool,
}

pub async fn set_accept_messages(
    State(state): State<AppState>,
    session: Session,
    body: Result<Json<AcceptMessagesRequest>, JsonRejection>,
) -> Result<Envelope, AccountsServiceError> {
    let Json(body) = body.map_err(|_| {
        AccountsServiceError::Validation("acceptMessages must be a boolean".to_owned())
    })?;

    let usecase = SetAcceptanceUseCase {
        accounts: state.account_repo(),
    };
    let accepting = usecase
        .execute(session.account_id, body.accept_messages)
        .await
        .map_err(|e| e.context("Error updating message acceptance status"))?;

    Envelope::success(
        StatusCode::OK,
        "Message acceptance status updated successfully",
    )
    .with("isAcceptingMessages", accepting)
    .map_err(|e| envelope_error(e, "Error updating message acceptance status"))
}

// ── GET /get-messages ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: Uuid,
    pub content: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            content: m.content,
            created_at: m.created_at,
        }
    }
}

pub async fn get_messages(
    State(state): State<AppState>,
    session: Session,
) -> Result<Envelope, AccountsServiceError> {
    let usecase = ListMessagesUseCase {
        messages: state.message_repo(),
    };
    let messages: Vec<MessageView> = usecase
        .execute(session.account_id)
        .await
        .map_err(|e| e.context("Error fetching messages"))?
        .into_iter()
        .map(MessageView::from)
        .collect();

    Envelope::success(StatusCode::OK, "Messages fetched")
        .with("messages", messages)
        .map_err(|e| envelope_error(e, "Error fetching messages"))
}

// ── DELETE /delete-message/{message_id} ───────────────────────────────────────

pub async fn delete_message(
    State(state): State<AppState>,
    session: Session,
    message_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Envelope, AccountsServiceError> {
    // A malformed id cannot name a stored message
    let Path(message_id) = message_id.map_err(|_| AccountsServiceError::MessageNotFound)?;

    let usecase = DeleteMessageUseCase {
        messages: state.message_repo(),
    };
    usecase
        .execute(session.account_id, message_id)
        .await
        .map_err(|e| e.context("Error deleting message"))?;

    Ok(Envelope::success(StatusCode::OK, "Message deleted"))
}

// ── POST /send-message ────────────────────────────────────────────────────────

fn content_rule(content: &str) -> Result<(), ValidationError> {
    rule("content", validate_content(content))
}

#[derive(Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(custom(function = "username_rule"))]
    pub username: String,
    #[validate(custom(function = "content_rule"))]
    pub content: String,
}

impl ValidatedBody for SendMessageRequest {
    const FIELDS: &'static [&'static str] = &["username", "content"];
}

pub async fn send_message(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SendMessageRequest>,
) -> Result<Envelope, AccountsServiceError> {
    let usecase = SendMessageUseCase {
        accounts: state.account_repo(),
        messages: state.message_repo(),
    };
    usecase
        .execute(SendMessageInput {
            username: body.username,
            content: body.content,
        })
        .await
        .map_err(|e| e.context("Error sending message"))?;

    Ok(Envelope::success(
        StatusCode::CREATED,
        "Message sent successfully",
    ))
}
