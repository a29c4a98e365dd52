use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};

use murmur_core::health::healthz;
use murmur_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    messages::{
        delete_message, get_accept_messages, get_messages, send_message, set_accept_messages,
    },
    session::{sign_in, sign_out},
    sign_up::{check_username_unique, sign_up},
    verify::verify_code,
};
use crate::state::AppState;

/// Handler for `GET /readyz`: 200 once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration
        .route("/sign-up", post(sign_up))
        .route("/check-username-unique", get(check_username_unique))
        .route("/verify-code", post(verify_code))
        // Session
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        // Inbox
        .route(
            "/accept-messages",
            get(get_accept_messages).post(set_accept_messages),
        )
        .route("/get-messages", get(get_messages))
        .route("/delete-message/{message_id}", delete(delete_message))
        .route("/send-message", post(send_message))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
