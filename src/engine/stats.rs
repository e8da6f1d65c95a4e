// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-segment statistics.

use geo::{Distance, Haversine, Point};

use crate::engine::segmentation::SegmentDraft;
use crate::models::{ActivitySegment, Location, PositionSample, SegmentType};

/// Compute a finalized segment from a draft.
///
/// Distance is the haversine sum over consecutive retained samples, not
/// a planar approximation. Average speed is `distance / duration` rather
/// than the mean of instantaneous readings, so it stays robust to
/// sampling-rate variance. For an open segment, duration runs to the
/// last sample seen; no wall-clock value is ever baked into the report.
pub fn compute_segment(seq: u32, draft: &SegmentDraft) -> ActivitySegment {
    let first = &draft.samples[0];
    let last = draft
        .samples
        .last()
        .expect("segment drafts always hold at least one sample");

    let start_time = first.timestamp;
    let end_time = draft.end_time;
    let duration_seconds = (end_time.unwrap_or(last.timestamp) - start_time).num_seconds();

    let distance_km = match draft.segment_type {
        SegmentType::Drive => path_distance_km(&draft.samples),
        SegmentType::Stop => 0.0,
    };

    let avg_speed_kph = match draft.segment_type {
        SegmentType::Drive if duration_seconds > 0 => {
            distance_km / (duration_seconds as f64 / 3600.0)
        }
        _ => 0.0,
    };

    let max_speed_kph = draft
        .samples
        .iter()
        .map(|s| s.speed_kph)
        .fold(0.0, f64::max);

    // End location only for closed drives: a stop doesn't go anywhere
    // and an ongoing drive hasn't arrived yet.
    let end_location = match (draft.segment_type, end_time) {
        (SegmentType::Drive, Some(_)) => Some(Location::new(last.latitude, last.longitude)),
        _ => None,
    };

    ActivitySegment {
        sequence_number: seq,
        segment_type: draft.segment_type,
        start_time,
        end_time,
        start_location: Location::new(first.latitude, first.longitude),
        end_location,
        distance_km,
        avg_speed_kph,
        max_speed_kph,
        duration_seconds,
    }
}

/// Great-circle path length over consecutive samples, in kilometers.
pub fn path_distance_km(samples: &[PositionSample]) -> f64 {
    samples
        .windows(2)
        .map(|pair| {
            let a = Point::new(pair[0].longitude, pair[0].latitude);
            let b = Point::new(pair[1].longitude, pair[1].latitude);
            Haversine.distance(a, b)
        })
        .sum::<f64>()
        / 1000.0
}
