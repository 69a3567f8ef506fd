//! Locked backing file.
//!
//! `QueueFile` is the exclusive section around every persistent queue
//! operation: it opens the backing file (creating it if missing), takes a
//! blocking exclusive lock, and hands the decoded snapshot to the caller.
//! Dropping the guard closes the handle and with it the lock, so a failed
//! load or save can never leave the file locked for later callers.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::Snapshot;

/// Exclusive handle on the backing file, held for one load-mutate-save cycle.
pub(crate) struct QueueFile {
    file: File,
}

impl QueueFile {
    /// Open the backing file and take the exclusive lock, blocking until the
    /// lock is granted.
    ///
    /// Creates the file if it is missing, but never its parent directory. A
    /// fresh file is initialized with the empty-snapshot encoding after the
    /// lock is already held, so no other locker can observe a half-created
    /// file.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(Error::Open)?;

        lock_exclusive(&file).map_err(Error::Lock)?;
        trace!(path = %path.display(), "queue file locked");

        let mut queue_file = Self { file };
        let len = queue_file.file.metadata().map_err(Error::Open)?.len();
        if len == 0 {
            debug!(path = %path.display(), "initializing new queue file");
            queue_file.write_from_start(Snapshot::empty_encoding())?;
        }
        Ok(queue_file)
    }

    /// Read the whole file and decode the snapshot it holds.
    pub fn load(&mut self) -> Result<Snapshot> {
        self.file.seek(SeekFrom::Start(0)).map_err(Error::Seek)?;
        let mut bytes = Vec::new();
        self.file.read_to_end(&mut bytes).map_err(Error::Read)?;

        let snapshot = Snapshot::decode(&bytes)?;
        trace!(items = snapshot.len(), "snapshot loaded");
        Ok(snapshot)
    }

    /// Overwrite the file with the encoding of `snapshot`.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let bytes = snapshot.encode()?;
        self.write_from_start(&bytes)?;
        debug!(items = snapshot.len(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }

    fn write_from_start(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(0)).map_err(Error::Seek)?;
        self.file.write_all(bytes).map_err(Error::Write)?;
        // Truncate stale bytes left over from a previously longer snapshot.
        self.file.set_len(bytes.len() as u64).map_err(Error::Write)?;
        Ok(())
    }

    /// Release the lock and close the handle, surfacing failure.
    ///
    /// Dropping the guard also unlocks, but silently; success paths call this
    /// so an unlock failure reaches the caller.
    pub fn release(self) -> Result<()> {
        unlock(&self.file).map_err(Error::Unlock)
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    // Advisory flock, exclusive. Blocks until the current holder releases.
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn unlock(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

// Windows uses different locking APIs; non-Unix builds open the file without
// an advisory lock.
#[cfg(not(unix))]
fn lock_exclusive(_file: &File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn unlock(_file: &File) -> std::io::Result<()> {
    Ok(())
}
