// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external collaborators (telemetry store, geocoder).

pub mod geocode;
pub mod telemetry;

pub use geocode::GeocodeService;
pub use telemetry::TelemetryClient;
