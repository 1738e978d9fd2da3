// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # printansi
//!
//! Prints its arguments, or the lines of its input files, as printable ANSI-C escaped
//! text. Nothing written by this crate can carry a live escape sequence to the terminal.
//!
//! The interesting part is the [`OutputChannel`]: output can be appended to a file that
//! is held under an exclusive [`flock`] only while there is activity. A one second
//! [`TimerService`] flushes the file when it goes quiet and closes it (releasing the
//! lock) a tick later. Under continuous activity the file is still closed once it has
//! been open longer than the configured cycle time, so an external tool can lock it,
//! move it away, and let `printansi` recreate it on the next write.
//!
//! ```text
//! Driver (args or lines)
//!   -> FormattingPipeline (prefix, date, quotes, escaped payload, suffix)
//!     -> DisarmGuard (RecordSink impl, holds the channel for one record)
//!       -> OutputChannel (open + lock, write, flush, close)
//!          ^
//!          TimerService (ticks once per second on a tokio task)
//! ```
//!
//! [`flock`]: https://man7.org/linux/man-pages/man2/flock.2.html

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod channel;
pub mod clap_config;
pub mod config;
pub mod decl_macros;
pub mod escape;
pub mod format;
pub mod input;
pub mod log;

// Re-export.
pub use channel::*;
pub use clap_config::*;
pub use config::*;
pub use escape::*;
pub use format::*;
pub use input::*;
pub use log::*;
