//! Error types for triageq.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("queue is empty")]
    EmptyQueue,

    #[error("cannot open case log {path}: {source}")]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write case log {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read case log {path}: {source}")]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed log entry at line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
