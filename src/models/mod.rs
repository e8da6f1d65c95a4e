// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod report;
pub mod sample;

pub use report::{
    ActivitySegment, DailyActivityReport, DailySummary, FirstStart, LastPosition, Location,
    SegmentType,
};
pub use sample::PositionSample;
