//! # shift-engine
//!
//! Deterministic partitioning of a work shift into N sub-shifts.
//!
//! A shift is a naive wall-clock interval that may run past midnight. The
//! engine tries to cut it into equal sub-shifts whose length is a multiple of
//! a rounding granularity (5 minutes by default). When that is impossible it
//! returns three alternatives instead of guessing: keep the interval and
//! spread the leftover over the first and last sub-shift, start earlier with
//! rounded-up shifts, or start later with rounded-down shifts.
//!
//! Everything here is a pure function of its inputs. Names, presentation and
//! persistence belong to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use shift_engine::{partition, Interval, PartitionRequest};
//!
//! let interval = Interval::parse("22:00", "06:00").unwrap();
//! let outcome = partition(&PartitionRequest::new(interval, 8)).unwrap();
//! let exact = outcome.exact().unwrap();
//! assert_eq!(exact.durations(), vec![60; 8]);
//! assert_eq!(exact.segments[7].end.to_string(), "06:00");
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — "HH:MM" parsing, floor-modulo wrapping, rounding, interval length
//! - [`partition`] — exact split or three alternatives, remainder redistribution
//! - [`segments`] — lay durations end to end from a start time
//! - [`direct`] — minute-level even split that ignores granularity
//! - [`roster`] — name pool, auto shift count, shuffled and paired labels
//! - [`format`] — localized plain-text tables
//! - [`report`] — serializable outcome snapshot
//! - [`error`] — Error types

pub mod clock;
pub mod direct;
pub mod error;
pub mod format;
pub mod partition;
pub mod report;
pub mod roster;
pub mod segments;

pub use clock::{
    format_clock_time, interval_duration, parse_clock_time, round_clock_time,
    round_to_granularity, ClockTime, Granularity, Interval, MINUTES_PER_DAY,
};
pub use direct::direct_split;
pub use error::ShiftError;
pub use format::{render_outcome, render_partition, render_table, Language};
pub use partition::{
    partition, partition_interval, Alternatives, Partition, PartitionOutcome, PartitionRequest,
    RemainderPlan, RemainderSplit, Strategy,
};
pub use report::PartitionReport;
pub use roster::{assign_names, auto_shift_count, AssignmentMode, NamePool};
pub use segments::{generate_segments, Segment};
