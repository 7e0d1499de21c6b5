//! Snapshot exporter.
//!
//! Turns a pop-ordered snapshot into the external JSON shape: an array of
//! objects keyed `patient_id, name, priority_level, condition, timestamp`
//! (epoch seconds). Read-only; callers take the snapshot from the engine.

use serde_json::Value;

use crate::model::CaseRecord;

/// JSON array of the given records, preserving their order.
pub fn snapshot_json(records: &[CaseRecord]) -> serde_json::Result<Value> {
    serde_json::to_value(records)
}

/// Compact JSON string of the given records, preserving their order.
pub fn to_json_string(records: &[CaseRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}
