// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ChannelConfig, ChannelError, DisarmGuard, IdlePhase, TimerService};
use std::{fs::File,
          io::{BufWriter, Stdout, Write},
          sync::{Arc, Mutex, MutexGuard, PoisonError,
                 atomic::{AtomicBool, AtomicU64, Ordering}}};

/// The single output destination shared by all input.
///
/// # Lifecycle
///
/// ```text
///            first byte to write                    idle tick 2
///  CLOSED ─────────────────────────▶ OPENING ──▶ OPEN ───────────▶ FLUSHING ──▶ OPEN
///    ▲     (open + create 0600,                   │
///    │      flock LOCK_EX|LOCK_NB,                │ idle tick 3, or a record completes
///    │      retry while contended)                │ after more than `cycle_time` ticks
///    │                                            ▼
///    └──────────────────────────────────── flush, unlock, close
/// ```
///
/// # Arm / disarm
///
/// All access to the handle goes through a [`DisarmGuard`], from [`Self::disarm()`]. It
/// locks the channel and clears the armed flag for as long as it lives, and restores the
/// flag on drop. The [`TimerService`] only acts on an armed channel that it can lock
/// without waiting, so a tick can never interleave with a record being written, and a
/// flush or close started by a tick can't be re-entered.
///
/// Cloning is cheap; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct OutputChannel {
    shared: Arc<ChannelShared>,
}

/// What the ticking task should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The channel is closed. Ticks are meaningless until it opens again, which will
    /// register a new ticking task.
    Unregister,
}

impl OutputChannel {
    /// Creates a closed channel. Pass `None` for `maybe_timer` to drive ticks by hand
    /// with [`Self::tick()`].
    #[must_use]
    pub fn new(config: ChannelConfig, maybe_timer: Option<TimerService>) -> Self {
        Self {
            shared: Arc::new(ChannelShared {
                config,
                is_armed: AtomicBool::new(false),
                open_tick_count: AtomicU64::new(0),
                is_date_stamp_fresh: AtomicBool::new(false),
                state: Mutex::new(ChannelState::default()),
                maybe_timer,
            }),
        }
    }

    /// Take exclusive access to the channel, blocking the timer out until the returned
    /// guard is dropped.
    ///
    /// Don't call any other method of this channel while holding the guard, they would
    /// deadlock.
    #[must_use]
    pub fn disarm(&self) -> DisarmGuard<'_> { DisarmGuard::acquire(&self.shared) }

    /// One timer tick. This is what the [`TimerService`] calls once per second.
    pub fn tick(&self) -> TickOutcome { ChannelShared::on_tick(&self.shared) }

    /// Flush and close the channel if it is open.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Flush`] if buffered output could not be written out. The
    /// channel is closed regardless.
    pub fn flush_and_close(&self) -> Result<(), ChannelError> { self.disarm().close() }

    /// Final flush and close, then stop the timer. Run this on every way out of the
    /// process.
    ///
    /// # Errors
    ///
    /// See [`Self::flush_and_close()`].
    pub fn shutdown(&self) -> Result<(), ChannelError> {
        let result = self.flush_and_close();
        if let Some(timer) = self.shared.maybe_timer.as_ref() {
            timer.shutdown();
        }
        result
    }

    #[must_use]
    pub fn config(&self) -> &ChannelConfig { &self.shared.config }

    #[must_use]
    pub fn is_open(&self) -> bool { self.lock_state().sink.is_some() }

    #[must_use]
    pub fn is_locked(&self) -> bool { self.lock_state().is_locked }

    #[must_use]
    pub fn is_armed(&self) -> bool { self.shared.is_armed.load(Ordering::SeqCst) }

    #[must_use]
    pub fn is_timer_registered(&self) -> bool { self.lock_state().is_timer_registered }

    #[must_use]
    pub fn idle_phase(&self) -> IdlePhase { self.lock_state().idle_phase }

    /// Ticks since the channel was last opened.
    #[must_use]
    pub fn open_tick_count(&self) -> u64 {
        self.shared.open_tick_count.load(Ordering::SeqCst)
    }

    pub(crate) fn shared(&self) -> &Arc<ChannelShared> { &self.shared }

    fn lock_state(&self) -> MutexGuard<'_, ChannelState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// The part of the channel shared between the writer and the ticking task.
#[derive(Debug)]
pub(crate) struct ChannelShared {
    pub(crate) config: ChannelConfig,
    pub(crate) is_armed: AtomicBool,
    pub(crate) open_tick_count: AtomicU64,
    /// Cleared on every tick, so a date stamp is computed at most once per second.
    pub(crate) is_date_stamp_fresh: AtomicBool,
    pub(crate) state: Mutex<ChannelState>,
    pub(crate) maybe_timer: Option<TimerService>,
}

/// Only ever touched through a [`DisarmGuard`] (or briefly by the read-only accessors).
#[derive(Debug, Default)]
pub(crate) struct ChannelState {
    pub(crate) sink: Option<OpenSink>,
    pub(crate) is_locked: bool,
    pub(crate) idle_phase: IdlePhase,
    pub(crate) is_timer_registered: bool,
    pub(crate) maybe_date_stamp: Option<String>,
}

#[derive(Debug)]
pub(crate) enum OpenSink {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
}

impl OpenSink {
    pub(crate) fn writer(&mut self) -> &mut dyn Write {
        match self {
            OpenSink::Stdout(it) => it,
            OpenSink::File(it) => it,
        }
    }

    pub(crate) fn file(&self) -> Option<&File> {
        match self {
            OpenSink::Stdout(_) => None,
            OpenSink::File(it) => Some(it.get_ref()),
        }
    }
}

impl ChannelShared {
    pub(crate) fn on_tick(self: &Arc<Self>) -> TickOutcome {
        self.open_tick_count.fetch_add(1, Ordering::SeqCst);
        self.is_date_stamp_fresh.store(false, Ordering::SeqCst);

        // Fast path, no need to touch the mutex.
        if !self.is_armed.load(Ordering::SeqCst) {
            return TickOutcome::Continue;
        }

        // Busy writer: treat it as disarmed.
        let Some(mut guard) = DisarmGuard::try_acquire(self) else {
            return TickOutcome::Continue;
        };

        // The flag may have changed between the fast path check and the lock.
        if !guard.was_armed() {
            return TickOutcome::Continue;
        }

        if !guard.is_open() {
            guard.mark_timer_unregistered();
            return TickOutcome::Unregister;
        }

        if let Err(error) = guard.apply_tick() {
            // % is Display, ? is Debug.
            tracing::error!(
                message = "timer could not flush or close the output",
                error = ?error
            );
        }

        TickOutcome::Continue
    }
}
