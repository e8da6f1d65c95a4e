// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort reverse geocoding.
//!
//! Address lookups are cosmetic: a failure or timeout leaves the
//! `address` field absent and must never fail report generation.
//! Results are cached per coordinate (rounded to ~1 m precision) since a
//! fleet vehicle stops at the same depots day after day.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures_util::stream::{self, StreamExt};
use serde::Deserialize;

use crate::models::DailyActivityReport;

/// How many reverse lookups run at once per report.
const GEOCODE_CONCURRENCY: usize = 8;

/// Cache key: coordinates rounded to 5 decimal places.
type CacheKey = (i64, i64);

fn cache_key(lat: f64, lon: f64) -> CacheKey {
    ((lat * 1e5).round() as i64, (lon * 1e5).round() as i64)
}

/// Nominatim-style reverse geocode response.
#[derive(Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Reverse geocoding client with an in-memory result cache.
#[derive(Clone)]
pub struct GeocodeService {
    http: reqwest::Client,
    base_url: Option<String>,
    cache: Arc<DashMap<CacheKey, String>>,
}

impl GeocodeService {
    /// Create a geocoder. With no base URL every lookup resolves to
    /// `None`, which is a valid (address-less) mode of operation.
    pub fn new(base_url: Option<String>, timeout_ms: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Resolve an address for a coordinate. Never fails: any error is
    /// logged and reported as `None`.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Option<String> {
        let base_url = self.base_url.as_ref()?;

        let key = cache_key(lat, lon);
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit.clone());
        }

        let url = format!("{}/reverse", base_url);
        let result = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("format", "jsonv2".to_string()),
            ])
            .send()
            .await;

        let response = match result {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::warn!(lat, lon, status = %r.status(), "Reverse geocode failed");
                return None;
            }
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "Reverse geocode request failed");
                return None;
            }
        };

        let address = match response.json::<ReverseResponse>().await {
            Ok(body) => body.display_name,
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "Malformed reverse geocode payload");
                None
            }
        };

        // Only successful resolutions are cached; transient failures
        // should be retried on the next report.
        if let Some(ref addr) = address {
            self.cache.insert(key, addr.clone());
        }

        address
    }

    /// Fill in the best-effort addresses on an assembled report.
    ///
    /// Lookups run with bounded concurrency; results are reattached
    /// strictly in segment order, so `sequenceNumber` ordering is
    /// untouched.
    pub async fn annotate_report(&self, report: &mut DailyActivityReport) {
        if self.base_url.is_none() {
            return;
        }

        let mut coords: Vec<(f64, f64)> = Vec::new();
        for segment in &report.activities {
            coords.push((
                segment.start_location.latitude,
                segment.start_location.longitude,
            ));
            if let Some(end) = &segment.end_location {
                coords.push((end.latitude, end.longitude));
            }
        }
        if let Some(first_start) = &report.first_start {
            coords.push((first_start.latitude, first_start.longitude));
        }

        let addresses: Vec<Option<String>> = stream::iter(coords)
            .map(|(lat, lon)| self.reverse(lat, lon))
            .buffered(GEOCODE_CONCURRENCY)
            .collect()
            .await;

        let mut next = addresses.into_iter();
        for segment in &mut report.activities {
            segment.start_location.address = next.next().flatten();
            if let Some(end) = &mut segment.end_location {
                end.address = next.next().flatten();
            }
        }
        if let Some(first_start) = &mut report.first_start {
            first_start.address = next.next().flatten();
        }
    }
}
