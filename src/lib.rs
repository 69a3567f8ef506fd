//! # jobqueue-rs
//!
//! Durable single-file FIFO job queue.
//!
//! Items are opaque structured payloads. [`FileQueue`] persists the whole
//! queue to one backing file and keeps it consistent across processes by
//! holding an exclusive file lock for the full duration of every operation.
//! [`MemoryQueue`] is the same contract without persistence, for testing.

pub mod error;
mod model;
pub mod queue;
mod storage;

pub use error::{Error, Result};
pub use queue::{FileQueue, JobQueue, MemoryQueue};
