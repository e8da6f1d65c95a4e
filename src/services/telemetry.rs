// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Telemetry store client for fetching raw position streams.
//!
//! The store guarantees samples ordered by non-decreasing timestamp;
//! the engine's noise filter protects itself against violations anyway.

use crate::error::AppError;
use crate::models::PositionSample;
use chrono::{DateTime, Utc};

use crate::time_utils::format_utc_rfc3339;

/// Client for the remote telemetry position store.
#[derive(Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelemetryClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch all position samples for one vehicle in `[from, to)`.
    ///
    /// An unknown vehicle maps to `NotFound`; a transient store failure
    /// maps to `Unavailable` so the caller can retry with backoff. An
    /// empty sample list for a known vehicle is a normal result, not an
    /// error.
    pub async fn fetch_positions(
        &self,
        vehicle_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PositionSample>, AppError> {
        let url = format!("{}/vehicles/{}/positions", self.base_url, vehicle_id);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("from", format_utc_rfc3339(from)),
                ("to", format_utc_rfc3339(to)),
            ])
            .send()
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 404 {
            return Err(AppError::NotFound(format!("Vehicle {} not found", vehicle_id)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(vehicle_id, %status, "Telemetry store returned error");
            return Err(AppError::Unavailable(format!("HTTP {}: {}", status, body)));
        }

        let samples: Vec<PositionSample> = response
            .json()
            .await
            .map_err(|e| AppError::Unavailable(format!("Malformed position payload: {}", e)))?;

        tracing::debug!(vehicle_id, count = samples.len(), "Fetched positions");
        Ok(samples)
    }
}
