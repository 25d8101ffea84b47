use std::{env, sync::Arc};

use discord::DiscordClient;
use error::AppError;
use events::EventKind;
use handlers::HandlerContext;
use service::{join_subscriptions, spawn_subscription};
use tokio::sync::Semaphore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod discord;
mod error;
mod events;
pub mod handlers;
mod service;
mod utils;

mod defaults {
    pub const MAX_IN_FLIGHT_EVENTS: &str = "64";
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notifier=info,gravita_chain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gravita notifier...");

    // Opens every configured chain (and loads .env)
    let connections: Vec<_> = gravita_chain::initialize_chains()
        .await?
        .into_iter()
        .map(Arc::new)
        .collect();

    let notifier = Arc::new(DiscordClient::connect().await?);

    let max_in_flight = parse_max_in_flight(env::var("MAX_IN_FLIGHT_EVENTS").ok())?;

    let ctx = connections
        .iter()
        .fold(HandlerContext::new(notifier), |ctx, connection| {
            ctx.with_chain(connection.clone())
        });
    let ctx = Arc::new(ctx);
    let in_flight = Arc::new(Semaphore::new(max_in_flight));

    // One subscription per (chain, event kind)
    let mut handles = Vec::with_capacity(connections.len() * EventKind::ALL.len());
    for connection in &connections {
        for kind in EventKind::ALL {
            handles.push(spawn_subscription(
                connection.clone(),
                kind,
                ctx.clone(),
                in_flight.clone(),
            ));
        }
    }

    tracing::info!(
        subscriptions = handles.len(),
        max_in_flight,
        "Gravita notifier ready"
    );

    let failed = join_subscriptions(handles).await;

    tracing::warn!(failed, "All subscriptions closed, shutting down");

    Ok(())
}

/// Permits for the in-flight limiter; unset falls back to the default
fn parse_max_in_flight(value: Option<String>) -> Result<usize, AppError> {
    let value = value.unwrap_or_else(|| defaults::MAX_IN_FLIGHT_EVENTS.to_string());
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|permits| *permits > 0)
        .ok_or_else(|| AppError::InvalidConfig {
            name: "MAX_IN_FLIGHT_EVENTS".to_string(),
            value,
        })
}
