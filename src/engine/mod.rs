// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily activity reconstruction engine.
//!
//! Converts a raw, irregularly-sampled stream of GPS pings for one
//! vehicle over one calendar day into an ordered sequence of alternating
//! Drive and Stop segments plus a day-level summary.
//!
//! Pipeline: noise filter → segmentation state machine → per-segment
//! statistics → report assembly. Everything in this module is a pure
//! fold over the ordered sample sequence; reverse geocoding and
//! telemetry I/O live in `services`.

pub mod assembler;
pub mod filter;
pub mod segmentation;
pub mod stats;

pub use assembler::reconstruct_day;
pub use filter::clean_samples;
pub use segmentation::{SegmentDraft, Segmenter};
