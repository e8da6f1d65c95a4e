// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity report endpoint.

use crate::engine::reconstruct_day;
use crate::error::{AppError, Result};
use crate::models::DailyActivityReport;
use crate::time_utils::day_window;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/vehicles/{vehicle_id}/activity",
        get(get_daily_activity),
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityQuery {
    /// Report date, `YYYY-MM-DD`
    date: String,
    /// Hysteresis threshold in seconds. The UI offers 60/120/300/600,
    /// but any positive value is accepted.
    min_stop_duration: Option<u32>,
}

fn parse_report_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("Invalid 'date' parameter: must be YYYY-MM-DD".to_string())
    })
}

/// Reconstruct one vehicle-day of Drive/Stop activity.
///
/// A fresh report is computed per request; a different
/// `minStopDuration` yields an independently recomputed report.
async fn get_daily_activity(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
    Query(params): Query<ActivityQuery>,
) -> Result<Json<DailyActivityReport>> {
    let report_date = parse_report_date(&params.date)?;

    let min_stop_secs = params
        .min_stop_duration
        .unwrap_or(state.config.default_min_stop_secs);
    if min_stop_secs == 0 {
        return Err(AppError::BadRequest(
            "Invalid 'minStopDuration' parameter: must be a positive number of seconds"
                .to_string(),
        ));
    }

    tracing::debug!(
        vehicle_id,
        date = %report_date,
        min_stop_secs,
        "Reconstructing daily activity"
    );

    let (from, to) = day_window(report_date);
    let samples = state
        .telemetry
        .fetch_positions(&vehicle_id, from, to)
        .await?;

    let mut report = reconstruct_day(
        &vehicle_id,
        report_date,
        samples,
        chrono::Duration::seconds(min_stop_secs as i64),
    );

    state.geocoder.annotate_report(&mut report).await;

    tracing::info!(
        vehicle_id,
        date = %report_date,
        segments = report.activities.len(),
        has_activity = report.has_activity,
        "Daily activity report served"
    );

    Ok(Json(report))
}
