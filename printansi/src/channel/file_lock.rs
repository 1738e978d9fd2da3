// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Open-or-create plus advisory locking of the output file, using rustix's safe
//! [`flock`] wrapper.
//!
//! The lock is held per open file description, so two independent opens of the same
//! path (even in the same process) contend with each other. This is what lets an
//! external rotator coordinate with `printansi`: it takes the lock, renames the file,
//! and releases the lock. `printansi` then creates a fresh file on its next open.

use super::channel_constants::NEW_FILE_MODE;
use rustix::{fs::{FlockOperation, flock},
             io::Errno};
use std::{fs::{File, OpenOptions},
          io,
          os::unix::fs::OpenOptionsExt,
          path::Path};

/// Opens `path` for reading and appending, creating it with mode `0600` if needed.
///
/// # Errors
///
/// Returns the I/O error if the file can't be opened or created.
pub fn open_for_append(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .mode(NEW_FILE_MODE)
        .open(path)
}

/// Tries to take an exclusive lock on the whole file, without blocking.
///
/// # Errors
///
/// Returns the errno if the lock was not acquired. [`Errno::WOULDBLOCK`] means another
/// open file description holds it.
pub fn try_lock_exclusive(file: &File) -> Result<(), Errno> {
    flock(file, FlockOperation::NonBlockingLockExclusive)
}

/// Releases a lock taken with [`try_lock_exclusive()`].
///
/// # Errors
///
/// Returns the I/O error from `flock(2)`.
pub fn unlock(file: &File) -> io::Result<()> {
    flock(file, FlockOperation::Unlock)?;
    Ok(())
}
