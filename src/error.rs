//! Error types for jobqueue-rs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The payload serialized to a bare scalar. Only structured values
    /// (objects, arrays) are admitted into a queue.
    #[error("cannot enqueue a bare {0}, items must be structured values")]
    InvalidItem(&'static str),

    #[error("could not encode item: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("stored item no longer decodes as the requested type: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not open queue file: {0}")]
    Open(#[source] std::io::Error),

    #[error("could not lock queue file: {0}")]
    Lock(#[source] std::io::Error),

    #[error("could not read queue file: {0}")]
    Read(#[source] std::io::Error),

    /// The backing file does not hold a decodable snapshot. Surfaced as-is;
    /// a corrupt queue is never silently treated as an empty one.
    #[error("queue file does not hold a valid snapshot: {0}")]
    CorruptSnapshot(#[source] serde_json::Error),

    #[error("could not save the queue (seek failed): {0}")]
    Seek(#[source] std::io::Error),

    #[error("could not save the queue (write failed): {0}")]
    Write(#[source] std::io::Error),

    #[error("could not unlock queue file: {0}")]
    Unlock(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
