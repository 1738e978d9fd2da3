// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ChannelError;

/// Where the [`crate::FormattingPipeline`] puts its bytes. In production this is a
/// [`crate::DisarmGuard`], which holds the output channel for the whole record.
pub trait RecordSink {
    /// Open the destination if it isn't already. Called at the start of each line.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Open`] if the destination can't be opened.
    fn ensure_open(&mut self) -> Result<(), ChannelError>;

    /// # Errors
    ///
    /// Returns [`ChannelError::Write`] (or [`ChannelError::Open`] if the destination had
    /// to be opened first).
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError>;

    /// The current `[YYYYMMDD-HHMMSS]` stamp.
    fn date_stamp(&mut self) -> String;
}
