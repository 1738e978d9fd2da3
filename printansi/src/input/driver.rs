// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{LineReader, LineTerminator};
use crate::{ChannelError, FormattingPipeline, OutputChannel, ok};
use std::{ffi::OsString,
          fs::File,
          io::{BufRead, BufReader},
          os::unix::ffi::OsStrExt,
          path::Path};

/// What the positional arguments are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// The arguments are the items of a single record.
    #[default]
    SingleShot,
    /// The arguments are input files (`-` is stdin). Each line is a record of one item.
    Loop,
}

/// Name that stands for stdin in loop mode.
pub const STDIN_ARG: &str = "-";

/// Feeds the input into the [`FormattingPipeline`] and on to the [`OutputChannel`].
///
/// This blocks on input and on file locks, so run it on a blocking thread. The channel
/// is held for one record at a time and never while waiting for input, which leaves the
/// timer free to flush and close a quiet output.
#[derive(Debug)]
pub struct Driver {
    channel: OutputChannel,
    pipeline: FormattingPipeline,
    terminator: LineTerminator,
}

impl Driver {
    #[must_use]
    pub fn new(
        channel: OutputChannel,
        pipeline: FormattingPipeline,
        terminator: LineTerminator,
    ) -> Self {
        Self {
            channel,
            pipeline,
            terminator,
        }
    }

    /// # Errors
    ///
    /// Returns the first [`ChannelError`]. Input errors are only reported.
    pub fn run(&mut self, mode: RunMode, args: &[OsString]) -> Result<(), ChannelError> {
        match mode {
            RunMode::SingleShot => self.run_single_shot(args),
            RunMode::Loop => self.run_loop(args),
        }
    }

    /// All arguments form one record, ended by a single suffix.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChannelError`].
    pub fn run_single_shot(&mut self, args: &[OsString]) -> Result<(), ChannelError> {
        let mut guard = self.channel.disarm();
        self.pipeline
            .format_record(&mut guard, args.iter().map(|arg| arg.as_bytes()))?;
        guard.record_complete()
    }

    /// Prints every line of every source in turn. A source that can't be opened or read
    /// is reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChannelError`].
    pub fn run_loop(&mut self, args: &[OsString]) -> Result<(), ChannelError> {
        for arg in args {
            if arg == STDIN_ARG {
                let stdin = std::io::stdin();
                self.print_source(stdin.lock(), STDIN_ARG)?;
                continue;
            }

            let path = Path::new(arg);
            match File::open(path) {
                Ok(file) => {
                    self.print_source(BufReader::new(file), &path.display().to_string())?;
                }
                Err(error) => {
                    // % is Display, ? is Debug.
                    tracing::error!(
                        message = "cannot open input",
                        path = %path.display(),
                        error = %error
                    );
                }
            }
        }
        ok!()
    }

    /// Prints each line of `reader` as its own record. Empty lines are skipped without
    /// touching the output. A read error abandons the rest of this source.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChannelError`].
    pub fn print_source(
        &mut self,
        reader: impl BufRead,
        name: &str,
    ) -> Result<(), ChannelError> {
        for result in LineReader::new(reader, self.terminator) {
            let line = match result {
                Ok(line) => line,
                Err(error) => {
                    tracing::error!(
                        message = "read error, skipping the rest of this input",
                        source = name,
                        error = %error
                    );
                    break;
                }
            };

            if line.is_empty() {
                continue;
            }

            let mut guard = self.channel.disarm();
            self.pipeline.emit_item(&mut guard, &line)?;
            self.pipeline.end_record(&mut guard)?;
            guard.record_complete()?;
        }
        ok!()
    }

    #[must_use]
    pub fn channel(&self) -> &OutputChannel { &self.channel }
}
