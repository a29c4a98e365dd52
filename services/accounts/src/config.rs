use serde::Deserialize;

use murmur_core::config::Config;

/// Accounts service configuration loaded from environment variables.
///
/// No `Debug`: the struct holds secrets.
#[derive(Deserialize)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// TCP port to listen on (default 3120). Env var: `ACCOUNTS_PORT`.
    #[serde(default = "default_port")]
    pub accounts_port: u16,
    /// `Secure` attribute on the session cookie (default true). Env var: `COOKIE_SECURE`.
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
    /// Transactional mail API endpoint.
    #[serde(default = "default_mail_api_url")]
    pub mail_api_url: String,
    /// Bearer key for the mail API. Codes are only logged when unset.
    #[serde(default)]
    pub mail_api_key: Option<String>,
    /// Sender address for verification emails.
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
}

fn default_port() -> u16 {
    3120
}

fn default_cookie_secure() -> bool {
    true
}

fn default_mail_api_url() -> String {
    "https://api.resend.com/emails".to_owned()
}

fn default_mail_from() -> String {
    "Murmur <onboarding@murmur.dev>".to_owned()
}

impl Config for AccountsConfig {}
