//! Intake engine: owns the in-memory queue and the durable case log.
//!
//! One explicit instance per caller context. The engine never hides a
//! persistence failure: an admission that could not be logged stays queued
//! in memory and carries the append error back to the caller.

use tracing::{info, warn};

use crate::error::Result;
use crate::log::CaseLog;
use crate::model::{CaseRecord, Priority};
use crate::queue::CaseQueue;

/// Outcome of admitting a case.
#[derive(Debug)]
pub struct Admission {
    /// The record as queued (timestamp already assigned).
    pub record: CaseRecord,
    /// Ok when the record also reached the durable log. Err means the case
    /// is queued in memory only and would not survive a reload.
    pub durable: Result<()>,
}

/// Reload summary: how many records were replayed, how many lines skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadStats {
    pub loaded: usize,
    pub skipped: usize,
}

/// Priority intake engine.
pub struct Engine {
    queue: CaseQueue,
    log: CaseLog,
}

impl Engine {
    pub fn new(log: CaseLog) -> Self {
        Self {
            queue: CaseQueue::new(),
            log,
        }
    }

    /// Classify, queue, and log one new case.
    ///
    /// The in-memory insert always succeeds; the log append may not, and
    /// its result is reported separately in [`Admission::durable`].
    pub fn admit(
        &mut self,
        patient_id: impl Into<String>,
        name: impl Into<String>,
        priority_label: &str,
        condition: impl Into<String>,
    ) -> Admission {
        let priority = Priority::from_label(priority_label);
        let record = CaseRecord::new(patient_id, name, priority, condition);

        self.queue.insert(record.clone());
        let durable = self.log.append(&record);

        match durable {
            Ok(()) => info!(
                patient_id = %record.patient_id,
                priority = %record.priority,
                "case admitted"
            ),
            Err(ref e) => warn!(
                patient_id = %record.patient_id,
                "case queued but not logged: {e}"
            ),
        }

        Admission { record, durable }
    }

    /// Pop the most urgent case. `EmptyQueue` when nothing is queued.
    pub fn next_case(&mut self) -> Result<CaseRecord> {
        self.queue.pop_next()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Rebuild the queue from the log: clear, then replay in file order.
    /// Stored timestamps are preserved. Malformed lines are skipped and
    /// counted, never fatal.
    pub fn reload(&mut self) -> Result<ReloadStats> {
        let report = self.log.load_all()?;
        self.queue.clear();

        let stats = ReloadStats {
            loaded: report.records.len(),
            skipped: report.skipped,
        };
        for record in report.records {
            self.queue.insert(record);
        }

        info!(
            loaded = stats.loaded,
            skipped = stats.skipped,
            path = %self.log.path().display(),
            "queue reloaded from log"
        );
        Ok(stats)
    }

    /// Empty the in-memory queue. The log is untouched.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// All queued records in full pop order, without mutating the queue.
    pub fn snapshot(&self) -> Vec<CaseRecord> {
        self.queue.snapshot_ordered()
    }

    pub fn log(&self) -> &CaseLog {
        &self.log
    }
}
