// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, BufRead, ErrorKind};

/// Which byte ends a line of input, in addition to NUL (which always does).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineTerminator {
    #[default]
    Newline,
    Nul,
}

impl LineTerminator {
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            LineTerminator::Newline => b'\n',
            LineTerminator::Nul => b'\0',
        }
    }
}

/// Splits a byte stream into lines. Lines are raw bytes (no UTF-8 requirement) and do
/// not include their terminator.
///
/// - A line ends at the configured [`LineTerminator`] or at a NUL byte.
/// - A trailing fragment without a terminator is still returned as the last line.
/// - An empty stream yields no lines at all.
///
/// The reader is also an [`Iterator`] over `io::Result<Vec<u8>>`, which stops for good
/// after the first error.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    terminator: u8,
    is_done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, terminator: LineTerminator) -> Self {
        Self {
            reader,
            terminator: terminator.as_byte(),
            is_done: false,
        }
    }

    /// Returns the next line, or `None` at the end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the source can't be read. Whatever was
    /// collected of the current line so far is discarded.
    pub fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.is_done {
            return Ok(None);
        }

        let mut line = vec![];

        loop {
            let (is_line_complete, consumed) = {
                let available = match self.reader.fill_buf() {
                    Ok(it) => it,
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(err) => {
                        self.is_done = true;
                        return Err(err);
                    }
                };

                // End of input.
                if available.is_empty() {
                    self.is_done = true;
                    return Ok(if line.is_empty() { None } else { Some(line) });
                }

                let terminator = self.terminator;
                match available
                    .iter()
                    .position(|&byte| byte == terminator || byte == b'\0')
                {
                    Some(index) => {
                        line.extend_from_slice(&available[..index]);
                        (true, index + 1)
                    }
                    None => {
                        line.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };

            self.reader.consume(consumed);

            if is_line_complete {
                return Ok(Some(line));
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> { self.next_line().transpose() }
}
