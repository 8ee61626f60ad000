// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sabrosa session API server
//!
//! Serves the user's profile, food log, and daily recommendations to the
//! web UI, refreshing recommendations from the external service whenever
//! the profile changes.

use sabrosa::{
    config::Config,
    services::{RecommendationClient, RecommendationService, Session, TracingSink},
    time_utils::SystemClock,
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Sabrosa session API");

    let clock = match config.utc_offset {
        Some(offset) => SystemClock::new(offset),
        None => SystemClock::local(),
    };
    tracing::info!(offset = %clock.offset(), "Session timezone fixed");

    // Load the session's initial profile
    tracing::info!(path = %config.seed_profile_path, "Loading seed profile");
    let session = Session::load_from_file(&config.seed_profile_path)?;

    let client = RecommendationClient::new(
        &config.recommend_api_url,
        Duration::from_secs(config.recommend_timeout_secs),
    )?;
    tracing::info!(url = %client.base_url(), "Recommendation client initialized");
    let recommendations = RecommendationService::new(client, Arc::new(TracingSink));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        session,
        recommendations,
        clock: Arc::new(clock),
    });

    // Profile construction counts as a change: fetch the first recommendations
    state.refresh_current().await;

    // Build router
    let app = sabrosa::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sabrosa=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
