//! WASM bindings for shift-engine.
//!
//! Exposes shift partitioning, remainder re-splitting, direct splitting and
//! name assignment to JavaScript via `wasm-bindgen`. Requests and results
//! cross the boundary as JSON strings; times are "HH:MM" strings.
//!
//! A slider UI calls `partitionShifts` once, then `splitRemainder` with the
//! returned remainder plan on every slider tick.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p shift-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/shift_engine_wasm.wasm
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use shift_engine::{
    AssignmentMode, ClockTime, Granularity, Interval, Language, PartitionReport, PartitionRequest,
    RemainderPlan,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input for `directSplit`.
#[derive(Deserialize)]
struct DirectInput {
    start: ClockTime,
    end: ClockTime,
    shift_count: u32,
    #[serde(default)]
    names: Vec<String>,
}

/// `partitionShifts` output: the report plus the open remainder plan, if any.
#[derive(Serialize)]
struct PartitionOutput {
    #[serde(flatten)]
    report: PartitionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    remainder_plan: Option<RemainderPlan>,
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Partition a shift.
///
/// `request_json` is `{start, end, shift_count, granularity?, names?}`.
/// Returns `{exact, start, end, total_minutes, crosses_midnight, partition}`
/// or `{exact: false, ..., alternatives, remainder_plan}`.
#[wasm_bindgen(js_name = "partitionShifts")]
pub fn partition_shifts(request_json: &str) -> Result<String, JsValue> {
    let request: PartitionRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;

    let outcome = shift_engine::partition(&request).map_err(js_error)?;
    let report = PartitionReport::new(&outcome, None).map_err(js_error)?;
    let remainder_plan = outcome.alternatives().map(|a| a.max_equal.clone());

    to_json(&PartitionOutput {
        report,
        remainder_plan,
    })
}

/// Re-render the "maximize" alternative for a new slider position.
///
/// `plan_json` is the `remainder_plan` returned by `partitionShifts`.
/// Returns the partition as JSON.
#[wasm_bindgen(js_name = "splitRemainder")]
pub fn split_remainder(plan_json: &str, first_extra: u32) -> Result<String, JsValue> {
    let plan: RemainderPlan = serde_json::from_str(plan_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid remainder plan JSON: {}", e)))?;
    let partition = plan.partition(first_extra).map_err(js_error)?;
    to_json(&partition)
}

/// Minute-level split that ignores the grid.
///
/// `input_json` is `{start, end, shift_count, names?}`.
#[wasm_bindgen(js_name = "directSplit")]
pub fn direct_split(input_json: &str) -> Result<String, JsValue> {
    let input: DirectInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;
    let partition = shift_engine::direct_split(
        Interval::new(input.start, input.end),
        input.shift_count,
        &input.names,
    )
    .map_err(js_error)?;
    to_json(&PartitionReport::single(partition))
}

/// Shuffle `names_json` (a JSON string array) with `seed` and, when `paired`,
/// join them two per shift. Returns a JSON string array.
#[wasm_bindgen(js_name = "assignNames")]
pub fn assign_names(names_json: &str, paired: bool, seed: u32) -> Result<String, JsValue> {
    let names: Vec<String> = serde_json::from_str(names_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid names JSON: {}", e)))?;
    let mode = if paired {
        AssignmentMode::Paired
    } else {
        AssignmentMode::Single
    };
    let mut rng = StdRng::seed_from_u64(seed as u64);
    to_json(&shift_engine::assign_names(&names, mode, &mut rng))
}

/// Number of shifts needed to seat `present` people.
#[wasm_bindgen(js_name = "autoShiftCount")]
pub fn auto_shift_count(present: u32, paired: bool) -> u32 {
    let mode = if paired {
        AssignmentMode::Paired
    } else {
        AssignmentMode::Single
    };
    shift_engine::auto_shift_count(present as usize, mode)
}

/// Snap an "HH:MM" time to the nearest grid mark.
#[wasm_bindgen(js_name = "roundClockTime")]
pub fn round_clock_time(time: &str, granularity: u32) -> Result<String, JsValue> {
    let time: ClockTime = time.parse().map_err(js_error)?;
    let granularity = Granularity::new(granularity).map_err(js_error)?;
    Ok(shift_engine::round_clock_time(time, granularity).to_string())
}

/// Render a `partitionShifts` request as plain text for the clipboard.
///
/// `language` is "en" or "he".
#[wasm_bindgen(js_name = "renderText")]
pub fn render_text(
    request_json: &str,
    first_extra: Option<u32>,
    language: &str,
) -> Result<String, JsValue> {
    let request: PartitionRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;
    let language: Language = language.parse().map_err(js_error)?;
    let outcome = shift_engine::partition(&request).map_err(js_error)?;
    shift_engine::render_outcome(&outcome, first_extra, language).map_err(js_error)
}
