use serde::Serialize;
use tracing::{info, warn};

use crate::domain::repository::VerificationNotifier;
use crate::error::AccountsServiceError;

pub const VERIFICATION_SUBJECT: &str = "Murmur | Verification Code";

const SEND_FAILED: &str = "Failed to send verification email";

/// Verification notifier selected at startup from configuration.
#[derive(Clone)]
pub enum Mailer {
    Http(HttpMailer),
    Log(LogMailer),
}

impl VerificationNotifier for Mailer {
    async fn send(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        match self {
            Self::Http(m) => m.send(email, username, code).await,
            Self::Log(m) => m.send(email, username, code).await,
        }
    }
}

// ── HTTP mail API ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Posts `{from, to, subject, html}` to a transactional mail API with a bearer key.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

impl VerificationNotifier for HttpMailer {
    async fn send(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [email],
            subject: VERIFICATION_SUBJECT,
            html: render_verification_html(username, code),
        };

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "mail API unreachable");
                AccountsServiceError::NotificationFailed(SEND_FAILED.to_owned())
            })?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "mail API rejected request");
            return Err(AccountsServiceError::NotificationFailed(
                SEND_FAILED.to_owned(),
            ));
        }
        Ok(())
    }
}

// ── Log-only ──────────────────────────────────────────────────────────────────

/// Logs the code instead of delivering it. Used when no mail API key is configured.
#[derive(Clone, Copy, Default)]
pub struct LogMailer;

impl VerificationNotifier for LogMailer {
    async fn send(
        &self,
        email: &str,
        username: &str,
        code: &str,
    ) -> Result<(), AccountsServiceError> {
        info!(email, username, code, "verification code (log mailer)");
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_verification_html(username: &str, code: &str) -> String {
    format!(
        "<h2>Hello {},</h2>\
         <p>Thank you for registering. Please use the following verification code to \
         complete your registration:</p>\
         <p><strong>{}</strong></p>\
         <p>The code expires in one hour. If you did not request this code, please ignore \
         this email.</p>",
        escape_html(username),
        escape_html(code),
    )
}
