//! Serializable snapshot of a partition outcome.
//!
//! Shape: `{"exact": true, "partition": {...}}` or
//! `{"exact": false, "alternatives": [max_equal, rounded_up, rounded_down]}`,
//! plus the requested interval and its total length. The remainder
//! alternative is frozen at one split and carries the data a caller needs to
//! offer the others.

use serde::Serialize;

use crate::clock::{ClockTime, Interval};
use crate::error::Result;
use crate::partition::{Partition, PartitionOutcome, RemainderPlan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionReport {
    pub exact: bool,
    pub start: ClockTime,
    pub end: ClockTime,
    pub total_minutes: u32,
    pub crosses_midnight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<Partition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeReport {
    #[serde(flatten)]
    pub partition: Partition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder: Option<RemainderReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemainderReport {
    pub base_minutes: u32,
    pub remainder: u32,
    pub first_extra: u32,
    pub last_extra: u32,
    /// Every valid `first_extra` value.
    pub steps: Vec<u32>,
}

impl RemainderReport {
    fn new(plan: &RemainderPlan, first_extra: u32) -> Self {
        RemainderReport {
            base_minutes: plan.base_minutes,
            remainder: plan.remainder,
            first_extra,
            last_extra: plan.remainder - first_extra,
            steps: plan.split_steps().collect(),
        }
    }
}

impl PartitionReport {
    /// Snapshot `outcome`, rendering the remainder alternative with
    /// `first_extra` or, when `None`, its default split. `first_extra` is
    /// ignored for exact outcomes.
    ///
    /// # Errors
    /// Returns `ShiftError::InvalidRemainderSplit` for an invalid `first_extra`.
    pub fn new(outcome: &PartitionOutcome, first_extra: Option<u32>) -> Result<Self> {
        match outcome {
            PartitionOutcome::Exact(partition) => Ok(Self::base(
                true,
                partition.interval(),
                Some(partition.clone()),
                Vec::new(),
            )),
            PartitionOutcome::Alternatives(alts) => {
                let plan = &alts.max_equal;
                let first_extra = first_extra.unwrap_or_else(|| plan.default_first_extra());
                let max_equal = plan.partition(first_extra)?;

                let alternatives = vec![
                    AlternativeReport {
                        partition: max_equal,
                        remainder: Some(RemainderReport::new(plan, first_extra)),
                    },
                    AlternativeReport {
                        partition: alts.rounded_up.clone(),
                        remainder: None,
                    },
                    AlternativeReport {
                        partition: alts.rounded_down.clone(),
                        remainder: None,
                    },
                ];
                Ok(Self::base(
                    false,
                    Interval::new(plan.start, plan.end),
                    None,
                    alternatives,
                ))
            }
        }
    }

    /// Wrap a single partition computed outside the strategy selector, such
    /// as a direct split.
    pub fn single(partition: Partition) -> Self {
        Self::base(true, partition.interval(), Some(partition), Vec::new())
    }

    fn base(
        exact: bool,
        interval: Interval,
        partition: Option<Partition>,
        alternatives: Vec<AlternativeReport>,
    ) -> Self {
        PartitionReport {
            exact,
            start: interval.start,
            end: interval.end,
            total_minutes: interval.duration_minutes(),
            crosses_midnight: interval.crosses_midnight(),
            partition,
            alternatives,
        }
    }
}
