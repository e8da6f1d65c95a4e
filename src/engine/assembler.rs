// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily report assembly.
//!
//! Runs the full Reader → Filter → Segmentation → Statistics pipeline
//! over one vehicle-day of samples and packages the result for the
//! dashboard. Pure and deterministic: the same samples and threshold
//! always produce an identical report, and nothing here performs I/O.

use chrono::{Duration, NaiveDate};

use crate::engine::filter::clean_samples;
use crate::engine::segmentation::Segmenter;
use crate::engine::stats::compute_segment;
use crate::models::{
    DailyActivityReport, DailySummary, FirstStart, LastPosition, PositionSample, SegmentType,
};

/// Reconstruct one vehicle-day of activity.
///
/// Zero samples is not an error: it yields a valid report with
/// `has_activity = false` and a zeroed summary. Addresses are left
/// absent; the geocoding service fills them afterwards.
pub fn reconstruct_day(
    vehicle_id: &str,
    report_date: NaiveDate,
    raw_samples: Vec<PositionSample>,
    min_stop: Duration,
) -> DailyActivityReport {
    let samples = clean_samples(raw_samples);

    let last_position = samples.last().map(|s| LastPosition {
        timestamp: s.timestamp,
        ignition_on: s.ignition_on,
        latitude: s.latitude,
        longitude: s.longitude,
    });

    let drafts = Segmenter::segment(samples, min_stop);

    let activities: Vec<_> = drafts
        .iter()
        .enumerate()
        .map(|(i, draft)| compute_segment(i as u32 + 1, draft))
        .collect();

    // first_start is a denormalization of the first Drive segment's
    // start, recomputed here rather than stored separately.
    let first_start = activities
        .iter()
        .find(|s| s.segment_type == SegmentType::Drive)
        .map(|s| FirstStart {
            timestamp: s.start_time,
            latitude: s.start_location.latitude,
            longitude: s.start_location.longitude,
            address: None,
        });

    let summary = DailySummary::from_segments(&activities);

    tracing::debug!(
        vehicle_id,
        date = %report_date,
        segments = activities.len(),
        stop_count = summary.stop_count,
        distance_km = summary.total_distance_km,
        "Reconstructed daily activity"
    );

    DailyActivityReport {
        vehicle_id: vehicle_id.to_string(),
        report_date,
        has_activity: !activities.is_empty(),
        activities,
        summary,
        first_start,
        last_position,
    }
}
