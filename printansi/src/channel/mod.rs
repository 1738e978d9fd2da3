// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The output channel: the one destination (stdout or a locked file) that all items are
//! written to, and the timer that flushes and closes it. See [`OutputChannel`].

// Attach sources.
pub mod channel_types;
pub mod disarm_guard;
pub mod file_lock;
pub mod idle_phase;
pub mod output_channel;
pub mod timer_service;

// Re-export.
pub use channel_types::*;
pub use disarm_guard::*;
pub use file_lock::*;
pub use idle_phase::*;
pub use output_channel::*;
pub use timer_service::*;
