// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fleet-Activity API Server
//!
//! Serves per-day Drive/Stop activity reports reconstructed from raw
//! GPS position streams held in a remote telemetry store.

use fleet_activity::{
    config::Config,
    services::{GeocodeService, TelemetryClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fleet-Activity API");

    // Telemetry store client (raw position streams)
    let telemetry = TelemetryClient::new(config.telemetry_url.clone());
    tracing::info!(url = %config.telemetry_url, "Telemetry client initialized");

    // Reverse geocoder (best-effort address resolution)
    let geocoder = GeocodeService::new(config.geocoder_url.clone(), config.geocode_timeout_ms);
    match &config.geocoder_url {
        Some(url) => tracing::info!(url = %url, "Geocoder initialized"),
        None => tracing::info!("No geocoder configured; addresses will be left unresolved"),
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        telemetry,
        geocoder,
    });

    // Build router
    let app = fleet_activity::routes::create_router(state);

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
                .add_directive("fleet_activity=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
