//! Granularity-aware partitioning of a shift interval into N sub-shifts.
//!
//! The interval is first tested for an exact split: N equal segments whose
//! length is a multiple of the granularity and that sum to the interval's
//! duration. When no such split exists, three alternatives are computed side
//! by side and handed back to the caller; none is chosen automatically.
//!
//! - [`Strategy::MaxEqualPlusRemainder`] keeps the interval and spreads the
//!   leftover minutes over the first and last segment (see [`RemainderPlan`]).
//! - [`Strategy::EqualRoundedUp`] rounds every segment up and starts earlier.
//! - [`Strategy::EqualRoundedDown`] rounds every segment down and starts later.
//!
//! All rounding is exact integer arithmetic on `total / (N * granularity)`.

use serde::{Deserialize, Serialize};

use crate::clock::{round_half_up, ClockTime, Granularity, Interval};
use crate::error::{Result, ShiftError};
use crate::segments::{assign_labels, generate_segments, Segment};

/// How a partition's segment lengths were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// N equal, granularity-aligned segments covering the interval exactly.
    ExactEqual,
    /// Largest aligned equal share, leftover split between first and last.
    MaxEqualPlusRemainder,
    /// Equal shares rounded up; the start moves earlier to absorb the surplus.
    EqualRoundedUp,
    /// Equal shares rounded down; the start moves later to drop the deficit.
    EqualRoundedDown,
    /// Minute-level split ignoring granularity (see [`crate::direct`]).
    DirectEven,
}

/// An ordered, contiguous run of segments with its effective interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub strategy: Strategy,
    /// Effective start, after any adjustment.
    pub start: ClockTime,
    pub end: ClockTime,
    /// Minutes the start was moved relative to the requested start.
    /// Negative means earlier.
    pub adjustment_minutes: i64,
    pub segments: Vec<Segment>,
}

impl Partition {
    pub(crate) fn build(
        strategy: Strategy,
        start: ClockTime,
        end: ClockTime,
        adjustment_minutes: i64,
        durations: &[u32],
        names: &[String],
    ) -> Self {
        Partition {
            strategy,
            start,
            end,
            adjustment_minutes,
            segments: generate_segments(start, durations, names),
        }
    }

    /// Sum of all segment durations.
    pub fn total_minutes(&self) -> u32 {
        self.segments.iter().map(|s| s.duration_minutes).sum()
    }

    pub fn durations(&self) -> Vec<u32> {
        self.segments.iter().map(|s| s.duration_minutes).collect()
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// True when every segment ends where the next one starts.
    pub fn is_contiguous(&self) -> bool {
        self.segments.windows(2).all(|w| w[0].end == w[1].start)
    }

    /// Relabel segments by position with `names`.
    pub fn with_names(mut self, names: &[String]) -> Self {
        assign_labels(&mut self.segments, names);
        self
    }
}

/// Caller-supplied parameters for one partition calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRequest {
    pub start: ClockTime,
    pub end: ClockTime,
    pub shift_count: u32,
    #[serde(default)]
    pub granularity: Granularity,
    /// Optional labels matched to segments by position.
    #[serde(default)]
    pub names: Vec<String>,
}

impl PartitionRequest {
    pub fn new(interval: Interval, shift_count: u32) -> Self {
        PartitionRequest {
            start: interval.start,
            end: interval.end,
            shift_count,
            granularity: Granularity::default(),
            names: Vec::new(),
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Result of a partition calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionOutcome {
    /// The interval divides exactly; this is the only result.
    Exact(Partition),
    /// No exact split exists; three alternatives for the caller to choose from.
    Alternatives(Alternatives),
}

impl PartitionOutcome {
    pub fn is_exact(&self) -> bool {
        matches!(self, PartitionOutcome::Exact(_))
    }

    pub fn exact(&self) -> Option<&Partition> {
        match self {
            PartitionOutcome::Exact(p) => Some(p),
            PartitionOutcome::Alternatives(_) => None,
        }
    }

    pub fn alternatives(&self) -> Option<&Alternatives> {
        match self {
            PartitionOutcome::Exact(_) => None,
            PartitionOutcome::Alternatives(a) => Some(a),
        }
    }
}

/// The three fallbacks offered when no exact split exists, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternatives {
    pub max_equal: RemainderPlan,
    pub rounded_up: Partition,
    pub rounded_down: Partition,
}

impl Alternatives {
    /// All three alternatives as partitions, the remainder plan rendered with
    /// its default split.
    pub fn to_partitions(&self) -> [Partition; 3] {
        [
            self.max_equal.default_partition(),
            self.rounded_up.clone(),
            self.rounded_down.clone(),
        ]
    }
}

/// How the leftover minutes are divided between the first and last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderSplit {
    pub first_extra: u32,
    pub last_extra: u32,
}

/// The [`Strategy::MaxEqualPlusRemainder`] alternative, kept open so the
/// caller can re-render it for any split of the remainder.
///
/// Every segment starts at `base_minutes`; the first gets `+first_extra` and
/// the last `+(remainder - first_extra)`. With a single segment both extras
/// land on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderPlan {
    pub start: ClockTime,
    pub end: ClockTime,
    pub shift_count: u32,
    pub base_minutes: u32,
    pub remainder: u32,
    pub granularity: Granularity,
    #[serde(default)]
    pub names: Vec<String>,
}

impl RemainderPlan {
    /// The initial split: half the remainder (floored), snapped to the
    /// granularity, goes to the first segment.
    pub fn default_first_extra(&self) -> u32 {
        let step = self.granularity.minutes() as u64;
        (round_half_up((self.remainder / 2) as u64, step) * step) as u32
    }

    /// Every valid `first_extra`: `0, g, 2g, ...` up to the remainder.
    pub fn split_steps(&self) -> impl Iterator<Item = u32> {
        (0..=self.remainder).step_by(self.granularity.minutes() as usize)
    }

    /// Check `first_extra` against the step grid and the remainder.
    ///
    /// # Errors
    /// Returns `ShiftError::InvalidRemainderSplit` when `first_extra` exceeds
    /// the remainder or is not a multiple of the granularity.
    pub fn split(&self, first_extra: u32) -> Result<RemainderSplit> {
        let step = self.granularity.minutes();
        if first_extra > self.remainder || first_extra % step != 0 {
            tracing::debug!(
                first_extra,
                remainder = self.remainder,
                step,
                "rejected remainder split"
            );
            return Err(ShiftError::InvalidRemainderSplit {
                first_extra,
                remainder: self.remainder,
                step,
            });
        }
        Ok(RemainderSplit {
            first_extra,
            last_extra: self.remainder - first_extra,
        })
    }

    /// Segment lengths for a given split.
    pub fn durations(&self, split: RemainderSplit) -> Vec<u32> {
        let mut durations = vec![self.base_minutes; self.shift_count as usize];
        if let Some(first) = durations.first_mut() {
            *first += split.first_extra;
        }
        if let Some(last) = durations.last_mut() {
            *last += split.last_extra;
        }
        durations
    }

    /// Render the plan with `first_extra` minutes added to the first segment.
    ///
    /// # Errors
    /// See [`RemainderPlan::split`].
    pub fn partition(&self, first_extra: u32) -> Result<Partition> {
        let split = self.split(first_extra)?;
        Ok(self.render(split))
    }

    /// Render the plan with [`RemainderPlan::default_first_extra`].
    pub fn default_partition(&self) -> Partition {
        let first_extra = self.default_first_extra();
        self.render(RemainderSplit {
            first_extra,
            last_extra: self.remainder - first_extra,
        })
    }

    fn render(&self, split: RemainderSplit) -> Partition {
        Partition::build(
            Strategy::MaxEqualPlusRemainder,
            self.start,
            self.end,
            0,
            &self.durations(split),
            &self.names,
        )
    }
}

/// Partition the interval described by `request`.
///
/// # Errors
/// Returns `ShiftError::DegenerateShiftCount` when `shift_count` is zero.
pub fn partition(request: &PartitionRequest) -> Result<PartitionOutcome> {
    partition_interval(
        request.interval(),
        request.shift_count,
        request.granularity,
        &request.names,
    )
}

/// Partition `interval` into `shift_count` granularity-aligned segments,
/// falling back to three alternatives when an exact split is impossible.
///
/// # Errors
/// Returns `ShiftError::DegenerateShiftCount` when `shift_count` is zero.
pub fn partition_interval(
    interval: Interval,
    shift_count: u32,
    granularity: Granularity,
    names: &[String],
) -> Result<PartitionOutcome> {
    if shift_count == 0 {
        return Err(ShiftError::DegenerateShiftCount(shift_count));
    }

    let total = interval.duration_minutes() as u64;
    let n = shift_count as u64;
    let step = granularity.minutes() as u64;
    let share = n * step;

    let perfect = round_half_up(total, share) * step;
    if perfect * n == total {
        tracing::debug!(total, shift_count, perfect, "exact equal partition");
        let durations = vec![perfect as u32; shift_count as usize];
        return Ok(PartitionOutcome::Exact(Partition::build(
            Strategy::ExactEqual,
            interval.start,
            interval.end,
            0,
            &durations,
            names,
        )));
    }

    let down = total / share * step;
    let up = total.div_ceil(share) * step;
    let deficit = total - down * n;
    let surplus = up * n - total;
    tracing::debug!(total, shift_count, down, up, deficit, surplus, "no exact partition");

    let max_equal = RemainderPlan {
        start: interval.start,
        end: interval.end,
        shift_count,
        base_minutes: down as u32,
        remainder: deficit as u32,
        granularity,
        names: names.to_vec(),
    };

    let up_shift = -(surplus as i64);
    let rounded_up = Partition::build(
        Strategy::EqualRoundedUp,
        interval.start.offset(up_shift),
        interval.end,
        up_shift,
        &vec![up as u32; shift_count as usize],
        names,
    );

    let down_shift = deficit as i64;
    let rounded_down = Partition::build(
        Strategy::EqualRoundedDown,
        interval.start.offset(down_shift),
        interval.end,
        down_shift,
        &vec![down as u32; shift_count as usize],
        names,
    );

    Ok(PartitionOutcome::Alternatives(Alternatives {
        max_equal,
        rounded_up,
        rounded_down,
    }))
}
