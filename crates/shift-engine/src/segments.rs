//! Segment generation: lay a list of durations end to end from a start time.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;

/// One sub-shift of a partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position within the partition.
    pub index: usize,
    pub start: ClockTime,
    pub end: ClockTime,
    pub duration_minutes: u32,
    /// Display label matched to this segment by position, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_name: Option<String>,
}

/// Walk `durations` in order from `start`, emitting one contiguous segment
/// per duration.
///
/// The elapsed-minute accumulator is unbounded; only each emitted boundary is
/// wrapped onto the clock, so segment `i`'s end is always segment `i + 1`'s
/// start. Segment `i` takes `names[i]` when present.
pub fn generate_segments(start: ClockTime, durations: &[u32], names: &[String]) -> Vec<Segment> {
    let mut elapsed = start.minutes() as i64;

    durations
        .iter()
        .enumerate()
        .map(|(i, &duration)| {
            let segment_start = ClockTime::from_minutes(elapsed);
            elapsed += duration as i64;
            Segment {
                index: i + 1,
                start: segment_start,
                end: ClockTime::from_minutes(elapsed),
                duration_minutes: duration,
                assigned_name: names.get(i).cloned(),
            }
        })
        .collect()
}

/// Overwrite the labels of `segments` by position. Segments beyond the end of
/// `names` are left unlabelled; surplus names are ignored.
pub fn assign_labels(segments: &mut [Segment], names: &[String]) {
    for (i, segment) in segments.iter_mut().enumerate() {
        segment.assigned_name = names.get(i).cloned();
    }
}
