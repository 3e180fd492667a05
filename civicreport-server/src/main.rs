//! CivicReport Service
//!
//! Citizen issue-reporting web service: citizens submit location-tagged
//! issues with photos, solvers triage them by department, admins moderate.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civicreport_server::{
    routes, AppState, Config, ConsoleNotifier, InMemoryAccountStore, InMemoryIssueStore,
    InMemorySessionStore, Notifier, SmtpNotifier, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civicreport_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(?config.port, ?config.database, "Loaded configuration");

    std::fs::create_dir_all(&config.upload_dir)?;

    let notifier: Box<dyn Notifier> = match config.smtp.clone() {
        Some(smtp) => Box::new(SmtpNotifier::new(smtp).map_err(anyhow::Error::msg)?),
        None => Box::new(ConsoleNotifier::new()),
    };

    let session_ttl = chrono::Duration::minutes(config.session_ttl_minutes);

    let app = match &config.database {
        Some(path) => {
            let store = Arc::new(SqliteStore::open(path, session_ttl)?);
            tracing::info!(path = %path, "Using SQLite store");
            let state = Arc::new(AppState::new(
                store.clone(),
                store.clone(),
                store,
                notifier,
                config.clone(),
            ));
            routes::create_router(state)
        }
        None => {
            tracing::warn!("No database configured, state is in memory only");
            let state = Arc::new(AppState::new(
                Arc::new(InMemoryAccountStore::new()),
                Arc::new(InMemoryIssueStore::new()),
                Arc::new(InMemorySessionStore::new(session_ttl)),
                notifier,
                config.clone(),
            ));
            routes::create_router(state)
        }
    };

    serve(app, config.port).await
}

async fn serve(app: Router, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("CivicReport listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
