//! Direct even split: minute-level division that ignores granularity.

use crate::clock::Interval;
use crate::error::{Result, ShiftError};
use crate::partition::{Partition, Strategy};

/// Segment lengths for splitting `total` minutes into `shift_count` parts.
///
/// Every part gets `total / shift_count`; the first `total % shift_count`
/// parts get one extra minute.
///
/// # Errors
/// Returns `ShiftError::DegenerateShiftCount` when `shift_count` is zero.
pub fn direct_durations(total: u32, shift_count: u32) -> Result<Vec<u32>> {
    if shift_count == 0 {
        return Err(ShiftError::DegenerateShiftCount(shift_count));
    }
    let base = total / shift_count;
    let rem = total % shift_count;
    Ok((0..shift_count)
        .map(|i| if i < rem { base + 1 } else { base })
        .collect())
}

/// Split `interval` into `shift_count` near-equal segments, keeping its start
/// and end. Lengths differ by at most one minute.
///
/// # Errors
/// Returns `ShiftError::DegenerateShiftCount` when `shift_count` is zero.
pub fn direct_split(interval: Interval, shift_count: u32, names: &[String]) -> Result<Partition> {
    let durations = direct_durations(interval.duration_minutes(), shift_count)?;
    Ok(Partition::build(
        Strategy::DirectEven,
        interval.start,
        interval.end,
        0,
        &durations,
        names,
    ))
}
