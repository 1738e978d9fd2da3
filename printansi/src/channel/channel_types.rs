// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter},
          io,
          path::PathBuf,
          time::Duration};

pub mod channel_constants {
    use super::Duration;

    /// Seconds (timer ticks) a file may stay open under continuous activity.
    pub const DEFAULT_CYCLE_TIME_SECS: u64 = 33;
    /// Pause between two attempts to lock a file that another process holds.
    pub const LOCK_RETRY_DELAY: Duration = Duration::from_millis(100);
    /// How often the [`crate::TimerService`] ticks.
    pub const TICK_PERIOD: Duration = Duration::from_secs(1);
    /// Permissions of a newly created output file (owner read / write only).
    pub const NEW_FILE_MODE: u32 = 0o600;
}

/// Where the output goes. This never changes for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl Display for OutputTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Policy knobs of an [`crate::OutputChannel`].
///
/// - `cycle_time`: when non zero, the channel is flushed and closed after the first
///   record that completes more than this many ticks after the channel was opened.
/// - `lock_retry_delay`: how long to wait before trying to lock the file again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub target: OutputTarget,
    pub cycle_time: u64,
    pub lock_retry_delay: Duration,
}

impl ChannelConfig {
    #[must_use]
    pub fn new(target: OutputTarget, cycle_time: u64) -> Self {
        Self {
            target,
            cycle_time,
            lock_retry_delay: channel_constants::LOCK_RETRY_DELAY,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(OutputTarget::Stdout, channel_constants::DEFAULT_CYCLE_TIME_SECS)
    }
}

/// Errors from the [`crate::OutputChannel`]. Lock contention is never one of them, it
/// is waited out.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ChannelError {
    /// The output file can't be created or opened. There is no way to recover from this
    /// since all input shares this one output.
    #[error("cannot open {}", .path.display())]
    #[diagnostic(
        code(r3bl_printansi::channel::open),
        help("Check that the parent folder exists and that you may write to it")
    )]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to {target}")]
    #[diagnostic(code(r3bl_printansi::channel::write))]
    Write {
        target: OutputTarget,
        #[source]
        source: io::Error,
    },

    #[error("failed to flush {target}")]
    #[diagnostic(code(r3bl_printansi::channel::flush))]
    Flush {
        target: OutputTarget,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_target_display() {
        assert_eq!(OutputTarget::Stdout.to_string(), "stdout");
        assert_eq!(
            OutputTarget::File(PathBuf::from("/tmp/out.log")).to_string(),
            "/tmp/out.log"
        );
    }

    #[test]
    fn test_default_config() {
        let config = ChannelConfig::default();
        assert_eq!(config.target, OutputTarget::Stdout);
        assert_eq!(config.cycle_time, 33);
        assert_eq!(config.lock_retry_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_open_error_message() {
        let err = ChannelError::Open {
            path: PathBuf::from("/nope/out.log"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "cannot open /nope/out.log");
    }
}
