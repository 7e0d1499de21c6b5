//! Append-only CSV case log.
//!
//! Durability layer for the queue: every admitted case is appended as one
//! CSV line, and the whole queue can be rebuilt by replaying the file in
//! order. Each append is a complete open/write/close cycle; no file handle
//! is held between calls, and there is no retry.
//!
//! Fields containing a comma, double quote, or line break are quoted
//! RFC 4180 style (embedded quotes doubled). Plain fields are written bare,
//! so logs that never needed quoting stay readable by older tooling.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{CaseRecord, Priority};

/// Header line written when the log file is first created.
pub const LOG_HEADER: &str = "patient_id,name,priority_level,condition,timestamp";

/// Result of replaying the log: records in file order, plus how many
/// malformed lines were skipped along the way.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<CaseRecord>,
    pub skipped: usize,
}

/// Handle to the durable case log at a fixed path.
#[derive(Debug, Clone)]
pub struct CaseLog {
    path: PathBuf,
}

impl CaseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file (and its parent directory)
    /// with the header row if it does not exist yet.
    pub fn append(&self, record: &CaseRecord) -> Result<()> {
        let open_err = |source| Error::LogOpen {
            path: self.path.clone(),
            source,
        };
        let write_err = |source| Error::LogWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }

        let fresh = !self.path.exists();
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(open_err)?;

        if fresh {
            writeln!(file, "{LOG_HEADER}").map_err(write_err)?;
        }
        writeln!(file, "{}", encode_line(record)).map_err(write_err)?;
        Ok(())
    }

    /// Replay every record line in file order.
    ///
    /// A missing file is zero records, not an error. A leading header row
    /// is discarded; a log without one keeps its first record. Malformed
    /// lines (wrong field count, bad priority, bad timestamp) are skipped
    /// and counted rather than aborting the load.
    pub fn load_all(&self) -> Result<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LoadReport::default());
            }
            Err(source) => {
                return Err(Error::LogOpen {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut report = LoadReport::default();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| Error::LogRead {
                path: self.path.clone(),
                source,
            })?;
            // A headerless log (created externally) keeps its first record.
            if idx == 0 && line == LOG_HEADER {
                continue;
            }
            if line.is_empty() {
                continue;
            }
            match parse_line(idx + 1, &line) {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!(path = %self.path.display(), "skipping entry: {e}");
                    report.skipped += 1;
                }
            }
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Line codec
// ---------------------------------------------------------------------------

fn encode_line(record: &CaseRecord) -> String {
    format!(
        "{},{},{},{},{}",
        escape_field(&record.patient_id),
        escape_field(&record.name),
        record.priority.rank(),
        escape_field(&record.condition),
        record.created_at.timestamp(),
    )
}

fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        std::borrow::Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        std::borrow::Cow::Borrowed(field)
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<CaseRecord> {
    let malformed = |reason: String| Error::MalformedEntry {
        line: line_no,
        reason,
    };

    let fields = split_fields(line).map_err(&malformed)?;
    if fields.len() != 5 {
        return Err(malformed(format!("expected 5 fields, got {}", fields.len())));
    }

    let rank: u8 = fields[2]
        .parse()
        .map_err(|_| malformed(format!("bad priority: {:?}", fields[2])))?;
    let priority = Priority::from_rank(rank)
        .ok_or_else(|| malformed(format!("priority rank out of range: {rank}")))?;

    let secs: i64 = fields[4]
        .parse()
        .map_err(|_| malformed(format!("bad timestamp: {:?}", fields[4])))?;
    let created_at = chrono::DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| malformed(format!("timestamp out of range: {secs}")))?;

    let mut it = fields.into_iter();
    let patient_id = it.next().unwrap_or_default();
    let name = it.next().unwrap_or_default();
    it.next(); // priority, already parsed
    let condition = it.next().unwrap_or_default();

    Ok(CaseRecord::restored(
        patient_id, name, priority, condition, created_at,
    ))
}

/// Quote-aware field split. Bare fields run to the next comma; quoted
/// fields may contain commas and doubled quotes.
fn split_fields(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut chars = line.chars().peekable();

    loop {
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        cur.push('"');
                    }
                    Some('"') => break,
                    Some(c) => cur.push(c),
                    None => return Err("unterminated quoted field".to_string()),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                cur.push(c);
                chars.next();
            }
        }
        fields.push(std::mem::take(&mut cur));

        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(c) => return Err(format!("unexpected character after quoted field: {c:?}")),
        }
    }

    Ok(fields)
}
