// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ChannelError, IdlePhase, OutputTarget, TickAction, open_for_append,
            output_channel::{ChannelShared, ChannelState, OpenSink},
            try_lock_exclusive, unlock};
use crate::{RecordSink, format_date_stamp};
use std::{fs::File,
          io::{BufWriter, Write},
          os::unix::fs::MetadataExt,
          path::Path,
          sync::{Arc, MutexGuard, PoisonError, TryLockError, atomic::Ordering},
          time::Duration};

/// Exclusive access to an [`crate::OutputChannel`] while the timer is kept out.
///
/// Creating the guard locks the channel and clears its armed flag. Dropping it puts the
/// armed flag back the way it found it, unless [`Self::ensure_open()`] opened the channel,
/// in which case the channel is left armed. This happens on every exit path, including
/// an early return with `?`.
///
/// The armed flag is only ever written while the channel's mutex is held.
pub struct DisarmGuard<'a> {
    shared: &'a Arc<ChannelShared>,
    state: MutexGuard<'a, ChannelState>,
    was_armed: bool,
    restore_armed: bool,
}

impl std::fmt::Debug for DisarmGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisarmGuard")
            .field("target", &self.shared.config.target)
            .field("was_armed", &self.was_armed)
            .field("restore_armed", &self.restore_armed)
            .finish_non_exhaustive()
    }
}

impl<'a> DisarmGuard<'a> {
    /// Blocks until the channel is free.
    pub(crate) fn acquire(shared: &'a Arc<ChannelShared>) -> Self {
        let state = shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        Self::new(shared, state)
    }

    /// Returns `None` if someone else holds the channel.
    pub(crate) fn try_acquire(shared: &'a Arc<ChannelShared>) -> Option<Self> {
        let state = match shared.state.try_lock() {
            Ok(state) => state,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };
        Some(Self::new(shared, state))
    }

    fn new(shared: &'a Arc<ChannelShared>, state: MutexGuard<'a, ChannelState>) -> Self {
        let was_armed = shared.is_armed.swap(false, Ordering::SeqCst);
        Self {
            shared,
            state,
            was_armed,
            restore_armed: was_armed,
        }
    }

    /// The armed flag as it was when this guard was created.
    #[must_use]
    pub fn was_armed(&self) -> bool { self.was_armed }

    #[must_use]
    pub fn is_open(&self) -> bool { self.state.sink.is_some() }

    pub(crate) fn mark_timer_unregistered(&mut self) {
        self.state.is_timer_registered = false;
    }

    /// Opens the channel if it is closed. For a file this blocks until the file can be
    /// locked. The tick count starts over and the timer is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Open`] if the file can't be opened or created.
    pub fn ensure_open(&mut self) -> Result<(), ChannelError> {
        if self.is_open() {
            return Ok(());
        }

        let shared = self.shared;
        let (sink, is_locked) = match &shared.config.target {
            OutputTarget::Stdout => (OpenSink::Stdout(BufWriter::new(std::io::stdout())), false),
            OutputTarget::File(path) => {
                (OpenSink::File(BufWriter::new(self.open_and_lock(path)?)), true)
            }
        };

        self.state.sink = Some(sink);
        self.state.is_locked = is_locked;
        self.state.idle_phase = IdlePhase::JustOpened;
        self.state.maybe_date_stamp = None;
        shared.open_tick_count.store(0, Ordering::SeqCst);
        shared.is_date_stamp_fresh.store(false, Ordering::SeqCst);
        self.restore_armed = true;

        self.register_timer();
        Ok(())
    }

    /// Retries without bound while another process holds the lock. After each lock the
    /// file is checked to still be the one at `path`; if it was renamed or removed while
    /// we waited, the stale handle is dropped and a new file is opened.
    fn open_and_lock(&self, path: &Path) -> Result<File, ChannelError> {
        let retry_delay = self.shared.config.lock_retry_delay;
        loop {
            match try_open_and_lock_once(path)? {
                LockAttempt::Locked(file) => return Ok(file),
                attempt => std::thread::sleep(attempt.pause_before_retry(retry_delay)),
            }
        }
    }

    fn register_timer(&mut self) {
        if self.state.is_timer_registered {
            return;
        }
        if let Some(timer) = self.shared.maybe_timer.as_ref() {
            timer.register(Arc::downgrade(self.shared));
            self.state.is_timer_registered = true;
        }
    }

    /// Appends `bytes`, opening the channel first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Open`] or [`ChannelError::Write`].
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        self.ensure_open()?;
        let shared = self.shared;
        if let Some(sink) = self.state.sink.as_mut() {
            sink.writer()
                .write_all(bytes)
                .map_err(|source| ChannelError::Write {
                    target: shared.config.target.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Writes out buffered output. Does nothing on a closed channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Flush`].
    pub fn flush(&mut self) -> Result<(), ChannelError> {
        let shared = self.shared;
        match self.state.sink.as_mut() {
            Some(sink) => sink.writer().flush().map_err(|source| ChannelError::Flush {
                target: shared.config.target.clone(),
                source,
            }),
            None => Ok(()),
        }
    }

    /// Flush, unlock and close. Does nothing on a closed channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Flush`]. The channel is closed either way.
    pub fn close(&mut self) -> Result<(), ChannelError> {
        let flush_result = self.flush();

        if let Some(sink) = self.state.sink.take() {
            if self.state.is_locked
                && let Some(file) = sink.file()
                && let Err(error) = unlock(file)
            {
                // Closing the file releases the lock anyway.
                tracing::debug!(message = "unlock failed", error = %error);
            }
            drop(sink);
            tracing::debug!(message = "closed file", target = %self.shared.config.target);
        }

        self.state.is_locked = false;
        self.state.idle_phase = IdlePhase::JustOpened;
        flush_result
    }

    /// Call once a whole record has been written. Counts as activity for the idle
    /// policy, and closes the channel if it has been open longer than the cycle time.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Flush`] if the rotation close fails to flush.
    pub fn record_complete(&mut self) -> Result<(), ChannelError> {
        self.state.idle_phase = IdlePhase::JustOpened;

        let cycle_time = self.shared.config.cycle_time;
        let open_tick_count = self.shared.open_tick_count.load(Ordering::SeqCst);
        if cycle_time > 0 && open_tick_count > cycle_time && self.is_open() {
            tracing::debug!(
                message = "cycle time elapsed, closing",
                open_tick_count = open_tick_count,
                cycle_time = cycle_time
            );
            return self.close();
        }
        Ok(())
    }

    /// The current `[YYYYMMDD-HHMMSS]` stamp. With a running timer, the stamp is computed
    /// at most once per tick. Without one there is nothing to invalidate the cached value,
    /// so it is computed every time.
    pub fn date_stamp(&mut self) -> String {
        let shared = self.shared;

        if shared.maybe_timer.is_none() {
            return format_date_stamp(chrono::Utc::now());
        }

        // Set before computing, so a tick in between makes the next call recompute.
        let was_fresh = shared.is_date_stamp_fresh.swap(true, Ordering::SeqCst);
        if was_fresh && let Some(stamp) = self.state.maybe_date_stamp.as_ref() {
            return stamp.clone();
        }

        let stamp = format_date_stamp(chrono::Utc::now());
        self.state.maybe_date_stamp = Some(stamp.clone());
        stamp
    }

    /// Advance the idle phase by one tick and do what it asks.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Flush`].
    pub fn apply_tick(&mut self) -> Result<TickAction, ChannelError> {
        let (next_phase, action) = self.state.idle_phase.on_tick();
        self.state.idle_phase = next_phase;
        match action {
            TickAction::Wait => {}
            TickAction::Flush => {
                tracing::debug!(message = "idle, flushing");
                self.flush()?;
            }
            TickAction::Close => {
                tracing::debug!(message = "idle, closing");
                self.close()?;
            }
        }
        Ok(action)
    }
}

impl Drop for DisarmGuard<'_> {
    fn drop(&mut self) {
        // Still holding the mutex here, it is released right after this.
        self.shared
            .is_armed
            .store(self.restore_armed, Ordering::SeqCst);
    }
}

impl RecordSink for DisarmGuard<'_> {
    fn ensure_open(&mut self) -> Result<(), ChannelError> { DisarmGuard::ensure_open(self) }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        DisarmGuard::write_bytes(self, bytes)
    }

    fn date_stamp(&mut self) -> String { DisarmGuard::date_stamp(self) }
}

/// Outcome of one open + lock attempt.
#[derive(Debug)]
enum LockAttempt {
    Locked(File),
    /// Another open file description holds the lock.
    Contended,
    /// Locked, but `path` no longer names the file we hold.
    Moved,
}

impl LockAttempt {
    /// Both a contended and a moved file wait before the next attempt, so a rotator
    /// that keeps renaming the file can't make the open loop spin.
    fn pause_before_retry(&self, retry_delay: Duration) -> Duration {
        match self {
            LockAttempt::Locked(_) => Duration::ZERO,
            LockAttempt::Contended | LockAttempt::Moved => retry_delay,
        }
    }
}

/// Dropping the file of a failed attempt closes it, which also releases a stale lock.
fn try_open_and_lock_once(path: &Path) -> Result<LockAttempt, ChannelError> {
    let file = open_for_append(path).map_err(|source| ChannelError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(message = "try to lock file", path = %path.display());

    if try_lock_exclusive(&file).is_err() {
        return Ok(LockAttempt::Contended);
    }

    if !is_still_at_path(&file, path) {
        tracing::debug!(
            message = "file was moved while waiting for the lock, reopening",
            path = %path.display()
        );
        return Ok(LockAttempt::Moved);
    }

    tracing::debug!(message = "appending to", path = %path.display());
    Ok(LockAttempt::Locked(file))
}

fn is_still_at_path(file: &File, path: &Path) -> bool {
    match (file.metadata(), std::fs::metadata(path)) {
        (Ok(held), Ok(current)) => held.dev() == current.dev() && held.ino() == current.ino(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelConfig, OutputChannel};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_failed_lock_attempt_pauses() {
        let retry_delay = Duration::from_millis(100);
        assert_eq!(LockAttempt::Contended.pause_before_retry(retry_delay), retry_delay);
        assert_eq!(LockAttempt::Moved.pause_before_retry(retry_delay), retry_delay);
    }

    #[test]
    fn test_single_lock_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let foreign = open_for_append(&path).unwrap();
        try_lock_exclusive(&foreign).unwrap();
        assert!(matches!(
            try_open_and_lock_once(&path).unwrap(),
            LockAttempt::Contended
        ));

        unlock(&foreign).unwrap();
        assert!(matches!(
            try_open_and_lock_once(&path).unwrap(),
            LockAttempt::Locked(_)
        ));
    }

    #[test]
    fn test_guard_restores_armed_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let channel =
            OutputChannel::new(ChannelConfig::new(OutputTarget::File(path), 0), None);

        {
            let guard = channel.disarm();
            assert!(!guard.was_armed());
        }
        // Nothing was opened, so it stays disarmed.
        assert!(!channel.is_armed());

        {
            let mut guard = channel.disarm();
            guard.ensure_open().unwrap();
        }
        assert!(channel.is_armed());

        {
            let mut guard = channel.disarm();
            assert!(guard.was_armed());
            guard.close().unwrap();
        }
        // Closing does not disarm. The next tick unregisters the timer.
        assert!(channel.is_armed());
    }

    #[test]
    fn test_guard_restores_armed_on_error_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("out.log");
        let channel = OutputChannel::new(ChannelConfig::new(OutputTarget::File(good), 0), None);
        channel.disarm().ensure_open().unwrap();
        assert!(channel.is_armed());

        let run = || -> Result<(), ChannelError> {
            let _guard = channel.disarm();
            Err(ChannelError::Flush {
                target: OutputTarget::Stdout,
                source: std::io::Error::other("boom"),
            })
        };
        assert!(run().is_err());
        assert!(channel.is_armed());
    }

    #[test]
    fn test_try_acquire_fails_while_held() {
        let channel = OutputChannel::new(ChannelConfig::default(), None);
        let _held = channel.disarm();
        assert!(DisarmGuard::try_acquire(channel.shared()).is_none());
    }

    #[test]
    fn test_date_stamp_shape() {
        let channel = OutputChannel::new(ChannelConfig::default(), None);
        let stamp = channel.disarm().date_stamp();
        assert_eq!(stamp.len(), "[20240101-000000]".len());
        assert!(stamp.starts_with('['));
        assert!(stamp.ends_with(']'));
        assert_eq!(stamp.as_bytes()[9], b'-');
    }
}
