//! Tests for strategy selection, remainder redistribution and the JSON report.

use shift_engine::partition::{partition, partition_interval, PartitionOutcome, Strategy};
use shift_engine::{Granularity, Interval, Partition, PartitionReport, PartitionRequest, ShiftError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn interval(start: &str, end: &str) -> Interval {
    Interval::parse(start, end).unwrap()
}

fn night(shift_count: u32) -> PartitionOutcome {
    partition(&PartitionRequest::new(interval("22:00", "06:00"), shift_count)).unwrap()
}

fn starts(p: &Partition) -> Vec<String> {
    p.segments.iter().map(|s| s.start.to_string()).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ── Exact split ─────────────────────────────────────────────────────────────

#[test]
fn eight_hour_night_into_eight_is_exact() {
    let outcome = night(8);
    assert!(outcome.is_exact());
    let p = outcome.exact().unwrap();

    assert_eq!(p.strategy, Strategy::ExactEqual);
    assert_eq!(p.durations(), vec![60; 8]);
    assert_eq!(
        starts(p),
        vec!["22:00", "23:00", "00:00", "01:00", "02:00", "03:00", "04:00", "05:00"]
    );
    assert_eq!(p.segments[7].end.to_string(), "06:00");
    assert_eq!(p.adjustment_minutes, 0);
    assert_eq!(p.start.to_string(), "22:00");
    assert_eq!(p.end.to_string(), "06:00");
}

#[test]
fn segment_indices_are_one_based() {
    let p = night(4).exact().cloned().unwrap();
    let indices: Vec<usize> = p.segments.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
}

#[test]
fn single_shift_covers_whole_interval() {
    let outcome = night(1);
    let p = outcome.exact().unwrap();
    assert_eq!(p.durations(), vec![480]);
}

#[test]
fn full_day_interval_splits_into_three() {
    let outcome = partition(&PartitionRequest::new(interval("08:00", "08:00"), 3)).unwrap();
    let p = outcome.exact().unwrap();
    assert_eq!(p.durations(), vec![480; 3]);
    assert_eq!(starts(p), vec!["08:00", "16:00", "00:00"]);
    assert_eq!(p.segments[2].end.to_string(), "08:00");
}

// ── Alternatives ────────────────────────────────────────────────────────────

#[test]
fn eight_hour_night_into_nine_offers_three_alternatives() {
    let outcome = night(9);
    assert!(!outcome.is_exact());
    let alts = outcome.alternatives().unwrap();

    assert_eq!(alts.max_equal.base_minutes, 50);
    assert_eq!(alts.max_equal.remainder, 30);
    assert_eq!(alts.max_equal.start.to_string(), "22:00");
    assert_eq!(alts.max_equal.end.to_string(), "06:00");

    let up = &alts.rounded_up;
    assert_eq!(up.strategy, Strategy::EqualRoundedUp);
    assert_eq!(up.durations(), vec![55; 9]);
    assert_eq!(up.start.to_string(), "21:45");
    assert_eq!(up.end.to_string(), "06:00");
    assert_eq!(up.adjustment_minutes, -15);
    assert_eq!(up.total_minutes(), 495);
    assert_eq!(up.segments[8].end.to_string(), "06:00");

    let down = &alts.rounded_down;
    assert_eq!(down.strategy, Strategy::EqualRoundedDown);
    assert_eq!(down.durations(), vec![50; 9]);
    assert_eq!(down.start.to_string(), "22:30");
    assert_eq!(down.end.to_string(), "06:00");
    assert_eq!(down.adjustment_minutes, 30);
    assert_eq!(down.total_minutes(), 450);
    assert_eq!(down.segments[8].end.to_string(), "06:00");
}

#[test]
fn default_remainder_split_halves_the_remainder() {
    let outcome = night(9);
    let plan = &outcome.alternatives().unwrap().max_equal;
    assert_eq!(plan.default_first_extra(), 15);

    let p = plan.default_partition();
    assert_eq!(p.strategy, Strategy::MaxEqualPlusRemainder);
    assert_eq!(p.durations(), vec![65, 50, 50, 50, 50, 50, 50, 50, 65]);
    assert_eq!(p.total_minutes(), 480);
    assert_eq!(p.segments[8].end.to_string(), "06:00");
}

#[test]
fn remainder_split_moves_minutes_between_first_and_last() {
    let outcome = night(9);
    let plan = &outcome.alternatives().unwrap().max_equal;

    let p = plan.partition(10).unwrap();
    assert_eq!(p.segments[0].duration_minutes, 60);
    assert_eq!(p.segments[8].duration_minutes, 70);
    assert_eq!(p.total_minutes(), 480);

    let all_first = plan.partition(30).unwrap();
    assert_eq!(all_first.segments[0].duration_minutes, 80);
    assert_eq!(all_first.segments[8].duration_minutes, 50);

    let all_last = plan.partition(0).unwrap();
    assert_eq!(all_last.segments[0].duration_minutes, 50);
    assert_eq!(all_last.segments[8].duration_minutes, 80);
}

#[test]
fn remainder_split_rejects_off_grid_and_oversized_values() {
    let outcome = night(9);
    let plan = &outcome.alternatives().unwrap().max_equal;

    assert!(matches!(
        plan.partition(7),
        Err(ShiftError::InvalidRemainderSplit {
            first_extra: 7,
            remainder: 30,
            step: 5
        })
    ));
    assert!(plan.partition(35).is_err());
}

#[test]
fn split_steps_cover_zero_to_remainder() {
    let outcome = night(9);
    let plan = &outcome.alternatives().unwrap().max_equal;
    let steps: Vec<u32> = plan.split_steps().collect();
    assert_eq!(steps, vec![0, 5, 10, 15, 20, 25, 30]);
}

#[test]
fn unaligned_start_leaves_unaligned_remainder() {
    // 22:03 -> 06:00 is 477 minutes.
    let outcome = partition(&PartitionRequest::new(interval("22:03", "06:00"), 9)).unwrap();
    let alts = outcome.alternatives().unwrap();
    let plan = &alts.max_equal;

    assert_eq!(plan.base_minutes, 50);
    assert_eq!(plan.remainder, 27);
    assert_eq!(plan.default_first_extra(), 15);
    assert_eq!(plan.split_steps().last(), Some(25));

    let split = plan.split(25).unwrap();
    assert_eq!(split.last_extra, 2);

    assert_eq!(alts.rounded_up.start.to_string(), "21:45");
    assert_eq!(alts.rounded_down.start.to_string(), "22:30");
}

#[test]
fn coarser_granularity_changes_the_grid() {
    let request = PartitionRequest::new(interval("22:00", "06:00"), 9)
        .with_granularity(Granularity::new(15).unwrap());
    let outcome = partition(&request).unwrap();
    let alts = outcome.alternatives().unwrap();

    assert_eq!(alts.max_equal.base_minutes, 45);
    assert_eq!(alts.max_equal.remainder, 75);
    assert_eq!(alts.max_equal.default_first_extra(), 30);
    assert_eq!(alts.rounded_up.durations(), vec![60; 9]);
    assert_eq!(alts.rounded_up.start.to_string(), "21:00");
}

#[test]
fn tiny_interval_rounds_down_to_empty_segments() {
    let outcome = partition(&PartitionRequest::new(interval("10:00", "10:10"), 3)).unwrap();
    let alts = outcome.alternatives().unwrap();
    assert_eq!(alts.max_equal.base_minutes, 0);
    assert_eq!(alts.max_equal.remainder, 10);
    assert_eq!(alts.rounded_down.durations(), vec![0; 3]);
    assert_eq!(alts.rounded_up.durations(), vec![5; 3]);
    assert_eq!(alts.rounded_up.start.to_string(), "09:55");
}

#[test]
fn to_partitions_lists_alternatives_in_display_order() {
    let outcome = night(9);
    let [a, b, c] = outcome.alternatives().unwrap().to_partitions();
    assert_eq!(a.strategy, Strategy::MaxEqualPlusRemainder);
    assert_eq!(b.strategy, Strategy::EqualRoundedUp);
    assert_eq!(c.strategy, Strategy::EqualRoundedDown);
}

// ── Errors and determinism ──────────────────────────────────────────────────

#[test]
fn zero_shifts_is_degenerate() {
    let result = partition_interval(interval("22:00", "06:00"), 0, Granularity::default(), &[]);
    assert!(matches!(result, Err(ShiftError::DegenerateShiftCount(0))));
}

#[test]
fn identical_inputs_give_identical_outcomes() {
    let request = PartitionRequest::new(interval("21:10", "05:35"), 7);
    assert_eq!(partition(&request).unwrap(), partition(&request).unwrap());
}

// ── Names ───────────────────────────────────────────────────────────────────

#[test]
fn names_are_matched_by_position() {
    let request = PartitionRequest::new(interval("22:00", "06:00"), 4)
        .with_names(names(&["Dana", "Eli", "Noa"]));
    let outcome = partition(&request).unwrap();
    let labels: Vec<Option<&str>> = outcome
        .exact()
        .unwrap()
        .segments
        .iter()
        .map(|s| s.assigned_name.as_deref())
        .collect();
    assert_eq!(labels, vec![Some("Dana"), Some("Eli"), Some("Noa"), None]);
}

#[test]
fn names_flow_into_every_alternative() {
    let request = PartitionRequest::new(interval("22:00", "06:00"), 9)
        .with_names(names(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]));
    let outcome = partition(&request).unwrap();
    for p in outcome.alternatives().unwrap().to_partitions() {
        assert_eq!(p.segments[0].assigned_name.as_deref(), Some("A"));
        assert_eq!(p.segments[8].assigned_name.as_deref(), Some("I"));
    }
}

#[test]
fn with_names_relabels_an_existing_partition() {
    let p = night(2).exact().cloned().unwrap().with_names(&names(&["X"]));
    assert_eq!(p.segments[0].assigned_name.as_deref(), Some("X"));
    assert_eq!(p.segments[1].assigned_name, None);
}

// ── Request and report serialization ────────────────────────────────────────

#[test]
fn request_deserializes_with_default_granularity() {
    let request: PartitionRequest =
        serde_json::from_str(r#"{"start":"22:00","end":"06:00","shift_count":9}"#).unwrap();
    assert_eq!(request.granularity.minutes(), 5);
    assert!(request.names.is_empty());
    assert_eq!(request.interval().duration_minutes(), 480);
}

#[test]
fn request_rejects_bad_time_and_zero_granularity() {
    assert!(serde_json::from_str::<PartitionRequest>(
        r#"{"start":"late","end":"06:00","shift_count":9}"#
    )
    .is_err());
    assert!(serde_json::from_str::<PartitionRequest>(
        r#"{"start":"22:00","end":"06:00","shift_count":9,"granularity":0}"#
    )
    .is_err());
}

#[test]
fn exact_report_has_partition_and_no_alternatives() {
    let report = PartitionReport::new(&night(8), None).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["exact"], true);
    assert_eq!(value["total_minutes"], 480);
    assert_eq!(value["crosses_midnight"], true);
    assert_eq!(value["partition"]["strategy"], "exact_equal");
    assert_eq!(value["partition"]["segments"].as_array().unwrap().len(), 8);
    assert_eq!(value["partition"]["segments"][0]["start"], "22:00");
    assert!(value.get("alternatives").is_none());
}

#[test]
fn fallback_report_lists_three_alternatives() {
    let report = PartitionReport::new(&night(9), None).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["exact"], false);
    assert!(value.get("partition").is_none());
    let alts = value["alternatives"].as_array().unwrap();
    assert_eq!(alts.len(), 3);

    assert_eq!(alts[0]["strategy"], "max_equal_plus_remainder");
    assert_eq!(alts[0]["remainder"]["first_extra"], 15);
    assert_eq!(alts[0]["remainder"]["last_extra"], 15);
    assert_eq!(alts[0]["remainder"]["steps"].as_array().unwrap().len(), 7);

    assert_eq!(alts[1]["strategy"], "equal_rounded_up");
    assert_eq!(alts[1]["start"], "21:45");
    assert_eq!(alts[1]["adjustment_minutes"], -15);
    assert!(alts[1].get("remainder").is_none());

    assert_eq!(alts[2]["strategy"], "equal_rounded_down");
    assert_eq!(alts[2]["start"], "22:30");
}

#[test]
fn report_uses_requested_split() {
    let report = PartitionReport::new(&night(9), Some(25)).unwrap();
    let first = &report.alternatives[0].partition;
    assert_eq!(first.segments[0].duration_minutes, 75);
    assert_eq!(first.segments[8].duration_minutes, 55);

    assert!(PartitionReport::new(&night(9), Some(31)).is_err());
    // Exact outcomes ignore the split.
    assert!(PartitionReport::new(&night(8), Some(31)).is_ok());
}
