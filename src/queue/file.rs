//! File-backed queue variant.
//!
//! Every operation is one transaction against the backing file: take the
//! exclusive lock, load the whole snapshot, apply the change, write the whole
//! snapshot back, unlock. Nothing is cached between calls; another process
//! may have rewritten the file since the last one.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::model::{Snapshot, decode_item, encode_item};
use crate::queue::JobQueue;
use crate::storage::QueueFile;

/// Persistent FIFO over a single backing file.
///
/// The file holds the complete queue; consistency across processes comes from
/// the exclusive lock held for the full duration of each operation. Instances
/// carry no state besides the path, so a fresh instance over an existing file
/// sees whatever the last writer saved.
#[derive(Debug, Clone)]
pub struct FileQueue<T> {
    path: PathBuf,
    _item: PhantomData<fn() -> T>,
}

impl<T> FileQueue<T> {
    /// Queue over the backing file at `path`.
    ///
    /// The file is created on first use; the parent directory must already
    /// exist. Construction itself touches nothing on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _item: PhantomData,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against the loaded snapshot inside the exclusive section,
    /// saving back only when `op` reports a mutation. The lock is released on
    /// every exit, error paths included, via the guard's drop.
    fn transact<R>(&self, op: impl FnOnce(&mut Snapshot) -> (R, bool)) -> Result<R> {
        let mut file = QueueFile::acquire(&self.path)?;
        let mut snapshot = file.load()?;

        let (result, dirty) = op(&mut snapshot);
        if dirty {
            file.save(&snapshot)?;
        }
        file.release()?;
        Ok(result)
    }
}

impl<T: Serialize + DeserializeOwned> JobQueue<T> for FileQueue<T> {
    fn count(&self) -> Result<usize> {
        self.transact(|snapshot| (snapshot.len(), false))
    }

    fn enqueue(&mut self, item: T) -> Result<()> {
        // Admission is checked before any file is touched.
        let value = encode_item(&item)?;
        debug!(path = %self.path.display(), "enqueue");
        self.transact(|snapshot| {
            snapshot.push(value);
            ((), true)
        })
    }

    fn dequeue(&mut self) -> Result<Option<T>> {
        debug!(path = %self.path.display(), "dequeue");
        let head = self.transact(|snapshot| {
            let head = snapshot.pop();
            let dirty = head.is_some();
            (head, dirty)
        })?;
        head.map(decode_item).transpose()
    }

    fn purge(&mut self) -> Result<()> {
        debug!(path = %self.path.display(), "purge");
        self.transact(|snapshot| {
            snapshot.clear();
            ((), true)
        })
    }
}
