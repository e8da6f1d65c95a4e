// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw GPS position sample as delivered by the telemetry store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped GPS reading for a vehicle.
///
/// Samples are produced externally and arrive ordered by `timestamp`
/// (ties broken by arrival order). They are never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSample {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kph: f64,
    pub ignition_on: bool,
    /// Odometer reading, when the device reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_km: Option<f64>,
}

impl PositionSample {
    /// Whether the coordinates are inside the valid WGS84 range.
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
