//! WorldOfToys storefront service

use anyhow::{Context, Result};
use futures::StreamExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worldoftoys::api::{self, AppState};
use worldoftoys::catalog::load_categories;
use worldoftoys::config::Config;
use worldoftoys::notification::{LogTransport, Notifier};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let db = PgPoolOptions::new().max_connections(10).connect(&config.database_url).await.context("connecting to Postgres")?;
    sqlx::migrate!("./migrations").run(&db).await?;
    let categories = load_categories(&db).await?;
    tracing::info!(categories = categories.all().len(), "catalog loaded");

    let notifier = Notifier::new(config.links.clone(), config.mail_from.clone(), LogTransport);
    match &config.nats_url {
        Some(url) => {
            let client = async_nats::connect(url.as_str()).await.context("connecting to NATS")?;
            let subject = config.notification_subject.clone();
            tokio::spawn(run_notifications(client, subject, notifier));
        }
        None => tracing::warn!("NATS_URL not set, notification worker disabled"),
    }

    let app = api::router(AppState { db, categories: Arc::new(categories) });
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("🧸 WorldOfToys storefront listening on {}", config.bind_addr());
    axum::serve(listener, app).await?;
    Ok(())
}

/// Renders and sends every notification request published on `subject`.
/// A bad message is logged and skipped.
async fn run_notifications(client: async_nats::Client, subject: String, notifier: Notifier<LogTransport>) {
    let mut messages = match client.subscribe(subject.clone()).await {
        Ok(subscriber) => subscriber,
        Err(e) => {
            tracing::error!(%subject, error = %e, "cannot subscribe to notifications");
            return;
        }
    };
    tracing::info!(%subject, "notification worker started");
    while let Some(message) = messages.next().await {
        if let Err(e) = notifier.notify_json(&message.payload).await {
            tracing::warn!(%subject, error = %e, "notification dropped");
        }
    }
    tracing::info!(%subject, "notification subscription closed");
}
