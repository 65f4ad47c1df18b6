//! WASM bindings for rendezvous-engine.
//!
//! Exposes meeting-time recommendation, heatmaps, the overlap index and
//! response summaries to JavaScript via `wasm-bindgen`. Every export takes the
//! snapshot as a JSON string (`{event, participants, timezoneOffsetMinutes}`)
//! and returns a JSON string.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p rendezvous-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/rendezvous-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/rendezvous_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/rendezvous-js/wasm/rendezvous_wasm.js \
//!    packages/rendezvous-js/wasm/rendezvous_wasm.cjs
//! ```

use rendezvous_engine::{
    build_heatmap, build_overlap_index, recommend_with_options, summarize_responses, EngineError,
    Granularity, RecommendOptions, RecommendationOutput, Snapshot,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON-in / JSON-out cores, kept free of `JsValue` so they run natively
// ---------------------------------------------------------------------------

fn to_json<T: Serialize>(value: &T) -> Result<String, EngineError> {
    Ok(serde_json::to_string(value)?)
}

fn recommend_json(snapshot_json: &str, limit: Option<u32>) -> Result<String, EngineError> {
    let snapshot = Snapshot::from_json(snapshot_json)?;
    let mut options = RecommendOptions {
        timezone_offset: snapshot.timezone_offset,
        ..RecommendOptions::default()
    };
    if let Some(limit) = limit {
        options.limit = limit as usize;
    }

    let windows = recommend_with_options(&snapshot.event, &snapshot.participants, &options);
    let output: Vec<RecommendationOutput> =
        windows.iter().map(RecommendationOutput::from).collect();
    to_json(&output)
}

fn heatmap_json(snapshot_json: &str) -> Result<String, EngineError> {
    let snapshot = Snapshot::from_json(snapshot_json)?;
    let cells = build_heatmap(
        &snapshot.event,
        &snapshot.participants,
        snapshot.timezone_offset,
    );
    to_json(&cells)
}

fn overlap_json(snapshot_json: &str, granularity: Option<String>) -> Result<String, EngineError> {
    let granularity: Granularity = match granularity.as_deref() {
        Some(g) => g.parse()?,
        None => Granularity::default(),
    };
    let snapshot = Snapshot::from_json(snapshot_json)?;
    let index = build_overlap_index(&snapshot.participants, granularity, snapshot.timezone_offset);
    to_json(&index.entries())
}

fn summary_json(snapshot_json: &str) -> Result<String, EngineError> {
    let snapshot = Snapshot::from_json(snapshot_json)?;
    to_json(&summarize_responses(&snapshot.participants))
}

fn js_error(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Rank the best candidate windows for the snapshot's event.
///
/// Returns a JSON array of `{startTime, endTime, participantCount,
/// totalParticipants, percentage, availableParticipantIds}` objects, best first.
///
/// # Arguments
/// - `snapshot_json` -- Event, participants and viewer offset
/// - `limit` -- Optional maximum number of windows (default 5; 0 also means 5)
#[wasm_bindgen(js_name = "recommendTimes")]
pub fn recommend_times(snapshot_json: &str, limit: Option<u32>) -> Result<String, JsValue> {
    recommend_json(snapshot_json, limit).map_err(js_error)
}

/// Dense heatmap over the event's date range: one cell per local day and
/// period for single-day events, one per local day for multi-day events.
#[wasm_bindgen(js_name = "buildHeatmap")]
pub fn heatmap(snapshot_json: &str) -> Result<String, JsValue> {
    heatmap_json(snapshot_json).map_err(js_error)
}

/// Sparse overlap index of participant slots.
///
/// `granularity` is one of `"slot"` (default), `"day-period"` or `"day"`.
#[wasm_bindgen(js_name = "buildOverlapIndex")]
pub fn overlap_index(snapshot_json: &str, granularity: Option<String>) -> Result<String, JsValue> {
    overlap_json(snapshot_json, granularity).map_err(js_error)
}

/// Response counts for the snapshot's participants.
#[wasm_bindgen(js_name = "summarizeResponses")]
pub fn summarize(snapshot_json: &str) -> Result<String, JsValue> {
    summary_json(snapshot_json).map_err(js_error)
}
