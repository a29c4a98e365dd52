use anyhow::Context as _;
use sea_orm::Database;
use tokio::signal;
use tracing::{info, warn};

use murmur_accounts::config::AccountsConfig;
use murmur_accounts::infra::mailer::{HttpMailer, LogMailer, Mailer};
use murmur_accounts::router::build_router;
use murmur_accounts::state::AppState;
use murmur_auth_types::session::SessionKey;
use murmur_core::config::Config;
use murmur_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let mailer = match config.mail_api_key {
        Some(key) => Mailer::Http(HttpMailer::new(config.mail_api_url, key, config.mail_from)),
        None => {
            warn!("MAIL_API_KEY not set; verification codes will only be logged");
            Mailer::Log(LogMailer)
        }
    };

    let state = AppState {
        db,
        mailer,
        session_key: SessionKey::new(config.session_secret),
        cookie_secure: config.cookie_secure,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("accounts service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
