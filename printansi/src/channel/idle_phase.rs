// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// How long an open channel has been quiet, counted in timer ticks since it was opened
/// or since the last completed record (whichever is later).
///
/// ```text
///   open / activity
///        │
///        ▼
///   JustOpened ──tick──▶ PendingFlush ──tick/Flush──▶ PendingClose ──tick/Close──▶ (closed)
/// ```
///
/// This is a pure state machine, see [`IdlePhase::on_tick()`]. Applying the returned
/// [`TickAction`] to the file is the job of the [`crate::OutputChannel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdlePhase {
    #[default]
    JustOpened,
    PendingFlush,
    PendingClose,
}

/// What a tick asks the channel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    Wait,
    /// Flush buffered output. The file stays open and locked.
    Flush,
    /// Flush, unlock, and close.
    Close,
}

impl IdlePhase {
    /// The transition function `(phase, tick) -> (phase, action)`.
    #[must_use]
    pub fn on_tick(self) -> (IdlePhase, TickAction) {
        match self {
            IdlePhase::JustOpened => (IdlePhase::PendingFlush, TickAction::Wait),
            IdlePhase::PendingFlush => (IdlePhase::PendingClose, TickAction::Flush),
            IdlePhase::PendingClose => (IdlePhase::JustOpened, TickAction::Close),
        }
    }
}
