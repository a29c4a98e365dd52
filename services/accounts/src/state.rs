use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use murmur_auth_types::session::SessionKey;

use crate::infra::db::{DbAccountRepository, DbMessageRepository};
use crate::infra::mailer::Mailer;
use crate::infra::password::Argon2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: Mailer,
    pub session_key: SessionKey,
    /// `Secure` attribute on the session cookie.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn message_repo(&self) -> DbMessageRepository {
        DbMessageRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }
}

impl FromRef<AppState> for SessionKey {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
