// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Where the [`crate::FormattingPipeline`] is within the current line.
///
/// Owned by the pipeline, there is one per run. It is reset by each end of record, and
/// left alone by skipped (empty) input lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineState {
    /// At least one item of the current line was emitted.
    pub within_line: bool,
    /// Index of the next quote to emit, always valid for the quote cycle in use.
    pub quote_cursor: usize,
    /// Whether a date stamp was emitted for the current line.
    pub is_date_stamp_emitted: bool,
}

impl LineState {
    /// Returns the current cursor and moves it to the next quote of a cycle of `len`.
    pub fn advance_quote(&mut self, len: usize) -> usize {
        let current = self.quote_cursor;
        self.quote_cursor = if len == 0 { 0 } else { (current + 1) % len };
        current
    }

    pub fn reset(&mut self) { *self = Self::default(); }
}
