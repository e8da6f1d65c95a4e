// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fleet_activity::config::Config;
use fleet_activity::routes::create_router;
use fleet_activity::services::{GeocodeService, TelemetryClient};
use fleet_activity::AppState;
use std::sync::Arc;

/// Create a test app with offline collaborators.
///
/// The telemetry URL points at a closed local port, so only requests
/// that fail validation before the upstream fetch can be exercised
/// end-to-end here; engine behavior is covered by the pure-function
/// suites.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let telemetry = TelemetryClient::new(config.telemetry_url.clone());
    let geocoder = GeocodeService::new(None, config.geocode_timeout_ms);

    let state = Arc::new(AppState {
        config,
        telemetry,
        geocoder,
    });

    (create_router(state.clone()), state)
}
