//! Queue contract and variants.
//!
//! `JobQueue` is the capability both variants implement: a strict FIFO over
//! opaque structured items. `MemoryQueue` keeps items in process memory;
//! `FileQueue` persists every change to an exclusively locked backing file.

pub mod file;
pub mod memory;

pub use file::FileQueue;
pub use memory::MemoryQueue;

use crate::error::Result;

/// A strict FIFO over opaque items.
///
/// Insertion order is dequeue order; there is no reordering, no priorities,
/// and no identity beyond position. Items must be structured values: an item
/// whose serialized form is a bare scalar is rejected with `InvalidItem`.
pub trait JobQueue<T> {
    /// Number of items currently held.
    fn count(&self) -> Result<usize>;

    /// Append an item to the tail of the queue.
    fn enqueue(&mut self, item: T) -> Result<()>;

    /// Remove and return the head item, or `None` if the queue is empty.
    ///
    /// An empty queue is not an error; `None` is the only signal.
    fn dequeue(&mut self) -> Result<Option<T>>;

    /// Drop all items. Idempotent.
    fn purge(&mut self) -> Result<()>;

    /// True if the queue holds no items.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }
}
