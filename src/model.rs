//! Core data model.
//!
//! A case record is one admitted intake event: who arrived, how urgent,
//! and when. Records are immutable once constructed; the queue owns them
//! exclusively until they are popped or the queue is cleared.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Urgency of a case, rank 1 (most urgent) through 4.
///
/// Doubles as the classifier: [`Priority::from_label`] is a total mapping
/// from free-text urgency labels to a rank. Unrecognized labels fail open
/// to [`Priority::Routine`], never to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Emergency,
    Urgent,
    Standard,
    Routine,
}

impl Priority {
    /// Classify a textual urgency label. Anything unrecognized is Routine.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Emergency" => Priority::Emergency,
            "Urgent" => Priority::Urgent,
            "Standard" => Priority::Standard,
            "Routine" => Priority::Routine,
            _ => Priority::Routine,
        }
    }

    /// Numeric rank, 1 = most urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Emergency => 1,
            Priority::Urgent => 2,
            Priority::Standard => 3,
            Priority::Routine => 4,
        }
    }

    /// Inverse of [`rank`](Self::rank). None for ranks outside 1..=4.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Priority::Emergency),
            2 => Some(Priority::Urgent),
            3 => Some(Priority::Standard),
            4 => Some(Priority::Routine),
            _ => None,
        }
    }

    /// Canonical label for this priority.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Emergency => "Emergency",
            Priority::Urgent => "Urgent",
            Priority::Standard => "Standard",
            Priority::Routine => "Routine",
        }
    }

    /// Label for a raw rank, "Unknown" for ranks outside 1..=4.
    pub fn label_for_rank(rank: u8) -> &'static str {
        match Self::from_rank(rank) {
            Some(p) => p.label(),
            None => "Unknown",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Priority travels as its integer rank in every serialized form
// (the CSV log column and the export JSON's `priority_level`).
// Inbound parsing goes through `from_rank` in the log codec instead.
impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.rank())
    }
}

// ---------------------------------------------------------------------------
// Case Record
// ---------------------------------------------------------------------------

/// One admitted intake event.
///
/// `created_at` is assigned at construction, or preserved verbatim when the
/// record is restored from the log. Empty strings are permitted in every
/// text field; nothing here validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    pub patient_id: String,

    pub name: String,

    #[serde(rename = "priority_level")]
    pub priority: Priority,

    pub condition: String,

    /// Admission time, unix epoch seconds on the wire.
    #[serde(rename = "timestamp", with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl CaseRecord {
    /// Construct a record for a case admitted right now.
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        priority: Priority,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            priority,
            condition: condition.into(),
            created_at: Utc::now(),
        }
    }

    /// Reconstruct a record from the log, keeping its stored timestamp.
    pub fn restored(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        priority: Priority,
        condition: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            priority,
            condition: condition.into(),
            created_at,
        }
    }
}
