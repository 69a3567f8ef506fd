//! In-memory queue variant. No persistence; everything is lost on drop.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::Result;
use crate::model::encode_item;
use crate::queue::JobQueue;

/// Non-persistent FIFO, for tests and single-process use.
///
/// Applies the same admission rule as the file-backed variant so the two are
/// interchangeable behind [`JobQueue`].
#[derive(Debug)]
pub struct MemoryQueue<T> {
    items: VecDeque<T>,
}

impl<T> MemoryQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for MemoryQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> JobQueue<T> for MemoryQueue<T> {
    fn count(&self) -> Result<usize> {
        Ok(self.items.len())
    }

    fn enqueue(&mut self, item: T) -> Result<()> {
        encode_item(&item)?;
        self.items.push_back(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<Option<T>> {
        Ok(self.items.pop_front())
    }

    fn purge(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}
