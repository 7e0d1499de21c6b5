//! # triageq
//!
//! Priority-ordered admission queue for triage-style case intake, backed
//! by an append-only CSV log for durability and full reload.
//!
//! The [`engine::Engine`] owns the in-memory [`queue::CaseQueue`] and the
//! durable [`log::CaseLog`]; admission classifies a textual urgency label
//! into a [`model::Priority`], queues the record, and appends it to the
//! log. Replay rebuilds the queue from the log, and [`export`] renders a
//! non-destructive, fully ordered JSON view of the current contents.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod log;
pub mod model;
pub mod queue;
