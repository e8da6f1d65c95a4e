// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Noise filter for raw position streams.
//!
//! GPS trackers produce physically implausible samples: coordinate
//! glitches, clock jumps, duplicate transmissions, speed spikes. The
//! filter drops them rather than correcting them, so distance and speed
//! statistics downstream are never computed from corrupted values.

use crate::models::PositionSample;

/// Speeds above this are treated as sensor error and the sample dropped.
const MAX_PLAUSIBLE_SPEED_KPH: f64 = 300.0;

/// Clean an ordered raw sample stream.
///
/// Returns the same samples in the same relative order, minus anything
/// implausible. Output timestamps are strictly increasing, which the
/// segmenter relies on (no zero-length sample pairs). Total over
/// arbitrary input; never fails.
pub fn clean_samples(raw: Vec<PositionSample>) -> Vec<PositionSample> {
    let input_len = raw.len();
    let mut cleaned: Vec<PositionSample> = Vec::with_capacity(input_len);

    for sample in raw {
        if !sample.has_valid_coordinates() {
            tracing::debug!(
                timestamp = %sample.timestamp,
                lat = sample.latitude,
                lon = sample.longitude,
                "Dropping sample with invalid coordinates"
            );
            continue;
        }

        if !sample.speed_kph.is_finite()
            || sample.speed_kph < 0.0
            || sample.speed_kph > MAX_PLAUSIBLE_SPEED_KPH
        {
            tracing::debug!(
                timestamp = %sample.timestamp,
                speed_kph = sample.speed_kph,
                "Dropping sample with implausible speed"
            );
            continue;
        }

        // Protect monotonicity: anything not strictly after the previous
        // retained sample is a clock glitch or duplicate transmission.
        if let Some(prev) = cleaned.last() {
            if sample.timestamp <= prev.timestamp {
                tracing::debug!(
                    timestamp = %sample.timestamp,
                    previous = %prev.timestamp,
                    "Dropping out-of-order or duplicate-timestamp sample"
                );
                continue;
            }
        }

        cleaned.push(sample);
    }

    if cleaned.len() < input_len {
        tracing::debug!(
            input = input_len,
            retained = cleaned.len(),
            "Noise filter dropped samples"
        );
    }

    cleaned
}
