use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use murmur_core::envelope::Envelope;

/// Accounts service domain error variants.
///
/// `Display` is the user-facing message placed in the response envelope.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("User already exists with this email")]
    EmailTaken,
    #[error("{0}")]
    NotificationFailed(String),
    #[error("User not found")]
    AccountNotFound,
    #[error("Account is already verified")]
    AlreadyVerified,
    #[error("Verification code has expired. Please sign up again to get a new code.")]
    CodeExpired,
    #[error("Incorrect verification code")]
    IncorrectCode,
    #[error("No user found with this email or username")]
    UnknownIdentifier,
    #[error("Please verify your account before signing in")]
    NotVerified,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("User is not accepting messages")]
    NotAcceptingMessages,
    #[error("Message not found or already deleted")]
    MessageNotFound,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
    #[error("{message}")]
    Unexpected {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::NotificationFailed(_) => "NOTIFICATION_FAILED",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::IncorrectCode => "INCORRECT_CODE",
            Self::UnknownIdentifier => "UNKNOWN_IDENTIFIER",
            Self::NotVerified => "NOT_VERIFIED",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",
            Self::NotAcceptingMessages => "NOT_ACCEPTING_MESSAGES",
            Self::MessageNotFound => "MESSAGE_NOT_FOUND",
            Self::Internal(_) | Self::Unexpected { .. } => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::UsernameTaken
            | Self::EmailTaken
            | Self::AlreadyVerified
            | Self::CodeExpired
            | Self::IncorrectCode => StatusCode::BAD_REQUEST,
            Self::IncorrectPassword => StatusCode::UNAUTHORIZED,
            Self::NotVerified | Self::NotAcceptingMessages => StatusCode::FORBIDDEN,
            Self::AccountNotFound | Self::UnknownIdentifier | Self::MessageNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::NotificationFailed(_) | Self::Internal(_) | Self::Unexpected { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Replace the generic message of an infrastructure failure with the endpoint's public
    /// message. Domain errors pass through unchanged.
    pub fn context(self, message: &'static str) -> Self {
        match self {
            Self::Internal(source) => Self::Unexpected { message, source },
            other => other,
        }
    }
}

/// A response body that failed to serialize, reported under the endpoint's public message.
pub fn envelope_error<E>(error: E, message: &'static str) -> AccountsServiceError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AccountsServiceError::Internal(anyhow::Error::new(error).context("serialize response body"))
        .context(message)
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only; the trace layer already records every request's status.
        match &self {
            Self::Internal(e) | Self::Unexpected { source: e, .. } => {
                tracing::error!(error = ?e, kind = self.kind(), "internal error");
            }
            Self::NotificationFailed(message) => {
                tracing::warn!(message = %message, kind = self.kind(), "notification failed");
            }
            _ => {}
        }
        Envelope::failure(status, self.to_string()).into_response()
    }
}
