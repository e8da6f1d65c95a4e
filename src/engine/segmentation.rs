// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Drive/Stop segmentation state machine.
//!
//! Classifies an ordered, cleaned sample stream into alternating Drive
//! and Stop runs. Naive speed thresholding flickers (a 2-second pause at
//! a traffic light would become a "stop"), so a pause inside a drive is
//! first buffered as a *candidate stop* and only promoted to a real Stop
//! segment once the stillness outlasts the caller-supplied
//! `min_stop_duration` hysteresis threshold. The reverse direction has
//! no minimum: genuine movement while parked immediately starts a Drive,
//! since driving resumption is not subject to GPS-drift-while-parked
//! noise.

use chrono::{DateTime, Duration, Utc};

use crate::models::{PositionSample, SegmentType};

/// Speeds at or below this are treated as stationary, absorbing GPS
/// jitter while parked. Ignition state is advisory context only and
/// never forces a classification change.
const MOVING_SPEED_EPSILON_KPH: f64 = 1.0;

/// A finalized run of samples of one type, before statistics are
/// computed. `end_time` is `None` for the trailing open segment.
#[derive(Debug, Clone)]
pub struct SegmentDraft {
    pub segment_type: SegmentType,
    pub samples: Vec<PositionSample>,
    pub end_time: Option<DateTime<Utc>>,
}

/// In-flight accumulation state. Each variant owns exactly the data its
/// phase needs; transitions are driven one sample at a time.
enum State {
    /// No sample seen yet.
    Idle,
    InDrive {
        samples: Vec<PositionSample>,
        /// Buffered non-moving samples not yet promoted to a Stop.
        candidate_stop: Vec<PositionSample>,
    },
    InStop {
        samples: Vec<PositionSample>,
    },
}

/// Single-pass segmenter. Feed cleaned samples in timestamp order with
/// [`Segmenter::push`], then call [`Segmenter::finish`] to close out the
/// trailing segment.
pub struct Segmenter {
    min_stop: Duration,
    state: State,
    drafts: Vec<SegmentDraft>,
}

fn is_moving(sample: &PositionSample) -> bool {
    sample.speed_kph > MOVING_SPEED_EPSILON_KPH
}

impl Segmenter {
    pub fn new(min_stop: Duration) -> Self {
        Self {
            min_stop,
            state: State::Idle,
            drafts: Vec::new(),
        }
    }

    /// Run the full stream through a fresh segmenter.
    pub fn segment(samples: Vec<PositionSample>, min_stop: Duration) -> Vec<SegmentDraft> {
        let mut segmenter = Self::new(min_stop);
        for sample in samples {
            segmenter.push(sample);
        }
        segmenter.finish()
    }

    pub fn push(&mut self, sample: PositionSample) {
        let moving = is_moving(&sample);

        // Take ownership of the state so each arm can rebuild it without
        // cloning the buffers.
        let state = std::mem::replace(&mut self.state, State::Idle);

        self.state = match state {
            State::Idle => {
                if moving {
                    State::InDrive {
                        samples: vec![sample],
                        candidate_stop: Vec::new(),
                    }
                } else {
                    State::InStop {
                        samples: vec![sample],
                    }
                }
            }

            State::InDrive {
                mut samples,
                mut candidate_stop,
            } => {
                if moving {
                    if candidate_stop.is_empty() {
                        samples.push(sample);
                        State::InDrive {
                            samples,
                            candidate_stop,
                        }
                    } else if self.candidate_sustained(&candidate_stop, sample.timestamp) {
                        // The pause outlasted the threshold: the drive ends
                        // where the stillness began, the stop spans the
                        // pause, and this sample opens the next drive.
                        let stop_start = candidate_stop[0].clone();
                        samples.push(stop_start);
                        let drive_end = candidate_stop[0].timestamp;
                        self.drafts.push(SegmentDraft {
                            segment_type: SegmentType::Drive,
                            samples,
                            end_time: Some(drive_end),
                        });
                        self.drafts.push(SegmentDraft {
                            segment_type: SegmentType::Stop,
                            samples: candidate_stop,
                            end_time: Some(sample.timestamp),
                        });
                        State::InDrive {
                            samples: vec![sample],
                            candidate_stop: Vec::new(),
                        }
                    } else {
                        // Pause was jitter: fold the buffered samples back
                        // into the still-open drive.
                        samples.append(&mut candidate_stop);
                        samples.push(sample);
                        State::InDrive {
                            samples,
                            candidate_stop,
                        }
                    }
                } else {
                    candidate_stop.push(sample);
                    State::InDrive {
                        samples,
                        candidate_stop,
                    }
                }
            }

            State::InStop { samples } => {
                if moving {
                    // No minimum for candidate drives: the stop closes at
                    // the first genuine movement.
                    self.drafts.push(SegmentDraft {
                        segment_type: SegmentType::Stop,
                        samples,
                        end_time: Some(sample.timestamp),
                    });
                    State::InDrive {
                        samples: vec![sample],
                        candidate_stop: Vec::new(),
                    }
                } else {
                    let mut samples = samples;
                    samples.push(sample);
                    State::InStop { samples }
                }
            }
        };
    }

    /// Close out the stream. The segment open at stream end is emitted
    /// without an `end_time`; a pending candidate stop is resolved
    /// against the threshold using the last sample as its end.
    pub fn finish(mut self) -> Vec<SegmentDraft> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => {}

            State::InDrive {
                mut samples,
                mut candidate_stop,
            } => {
                let promoted = match candidate_stop.last() {
                    Some(last) => self.candidate_sustained(&candidate_stop, last.timestamp),
                    None => false,
                };

                if promoted {
                    let stop_start = candidate_stop[0].clone();
                    samples.push(stop_start);
                    let drive_end = candidate_stop[0].timestamp;
                    self.drafts.push(SegmentDraft {
                        segment_type: SegmentType::Drive,
                        samples,
                        end_time: Some(drive_end),
                    });
                    self.drafts.push(SegmentDraft {
                        segment_type: SegmentType::Stop,
                        samples: candidate_stop,
                        end_time: None,
                    });
                } else {
                    samples.append(&mut candidate_stop);
                    self.drafts.push(SegmentDraft {
                        segment_type: SegmentType::Drive,
                        samples,
                        end_time: None,
                    });
                }
            }

            State::InStop { samples } => {
                self.drafts.push(SegmentDraft {
                    segment_type: SegmentType::Stop,
                    samples,
                    end_time: None,
                });
            }
        }

        self.drafts
    }

    /// A candidate stop is promoted only when the stillness *exceeds*
    /// the threshold: a pause of exactly `min_stop` is still noise.
    fn candidate_sustained(
        &self,
        candidate: &[PositionSample],
        until: DateTime<Utc>,
    ) -> bool {
        until - candidate[0].timestamp > self.min_stop
    }
}
