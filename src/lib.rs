// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fleet-Activity: daily activity reconstruction for fleet vehicles
//!
//! This crate provides the backend API that converts raw GPS position
//! streams into per-day Drive/Stop activity reports consumed by the
//! fleet-management dashboard.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{GeocodeService, TelemetryClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub telemetry: TelemetryClient,
    pub geocoder: GeocodeService,
}
