// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity report model served to the dashboard.
//!
//! Field names are part of the UI contract (camelCase on the wire:
//! `sequenceNumber`, `distanceKm`, `avgSpeedKph`, `firstStart`,
//! `lastPosition`), so all wire types rename accordingly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Segment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentType {
    Drive,
    Stop,
}

/// A point on the map with a best-effort resolved address.
///
/// `address` is filled by the reverse geocoder after the report is
/// assembled; absence is valid and the UI renders it as "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }
}

/// A maximal contiguous run of either driving or stationary behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySegment {
    /// 1-based, strictly increasing within a day.
    pub sequence_number: u32,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub start_time: DateTime<Utc>,
    /// Absent iff the segment is still open at the end of the day's data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub start_location: Location,
    /// Drive segments only; absent while the drive is ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Location>,
    /// Great-circle distance covered; always 0 for Stop segments.
    pub distance_km: f64,
    pub avg_speed_kph: f64,
    pub max_speed_kph: f64,
    pub duration_seconds: i64,
}

impl ActivitySegment {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Start of the day's first drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstStart {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Most recent sample of the day, regardless of segment boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPosition {
    pub timestamp: DateTime<Utc>,
    pub ignition_on: bool,
    pub latitude: f64,
    pub longitude: f64,
}

/// Day-level totals, derived from the segment list.
///
/// Never stored independently of its report; recomputed whenever the
/// segment list changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_driving_seconds: i64,
    pub total_stopped_seconds: i64,
    /// Count of *closed* Stop segments. An ongoing stop is not counted
    /// until it closes, so a still-parked vehicle never double counts.
    pub stop_count: u32,
    pub total_distance_km: f64,
    pub max_speed_kph: f64,
}

impl DailySummary {
    /// Recompute the summary from a segment list.
    pub fn from_segments(segments: &[ActivitySegment]) -> Self {
        let mut summary = Self::default();
        for segment in segments {
            match segment.segment_type {
                SegmentType::Drive => {
                    summary.total_driving_seconds += segment.duration_seconds;
                    summary.total_distance_km += segment.distance_km;
                }
                SegmentType::Stop => {
                    summary.total_stopped_seconds += segment.duration_seconds;
                    if !segment.is_open() {
                        summary.stop_count += 1;
                    }
                }
            }
            summary.max_speed_kph = summary.max_speed_kph.max(segment.max_speed_kph);
        }
        summary
    }
}

/// The full report consumed by the dashboard's daily activity screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivityReport {
    pub vehicle_id: String,
    pub report_date: NaiveDate,
    /// False iff the day's position stream was empty.
    pub has_activity: bool,
    pub activities: Vec<ActivitySegment>,
    pub summary: DailySummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_start: Option<FirstStart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_position: Option<LastPosition>,
}
