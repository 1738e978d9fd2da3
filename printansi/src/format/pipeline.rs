// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{LineState, QuoteCycle, RecordSink};
use crate::{ChannelError, FormatConfig, encode_into, ok};

/// Formats items into a [`RecordSink`].
///
/// For each item:
///
/// ```text
/// ┌─────────────────────────────┬───────┬───────────────┬───────┐
/// │ separator                   │ quote │ escaped item  │ quote │
/// │ or (first item of the line) │       │               │       │
/// │ date stamp + prefix         │       │               │       │
/// └─────────────────────────────┴───────┴───────────────┴───────┘
/// ```
///
/// and once per record, [`Self::end_record()`] emits the suffix, but only if at least
/// one item was emitted.
#[derive(Debug, Clone)]
pub struct FormattingPipeline {
    config: FormatConfig,
    quotes: QuoteCycle,
    line_state: LineState,
    /// Reused across items to avoid an allocation per payload.
    scratch: Vec<u8>,
}

impl FormattingPipeline {
    #[must_use]
    pub fn new(config: FormatConfig) -> Self {
        let quotes = QuoteCycle::from(&config.quote);
        Self {
            config,
            quotes,
            line_state: LineState::default(),
            scratch: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FormatConfig { &self.config }

    #[must_use]
    pub fn line_state(&self) -> &LineState { &self.line_state }

    /// Emits one item. The destination is opened at the start of each line.
    ///
    /// # Errors
    ///
    /// Any [`ChannelError`] from the sink.
    pub fn emit_item(
        &mut self,
        sink: &mut impl RecordSink,
        raw: &[u8],
    ) -> Result<(), ChannelError> {
        // Prefix phase.
        if self.line_state.within_line {
            sink.write_bytes(self.config.separator_bytes())?;
        } else {
            sink.ensure_open()?;
            if self.config.date_stamp && !self.line_state.is_date_stamp_emitted {
                let stamp = sink.date_stamp();
                sink.write_bytes(stamp.as_bytes())?;
                self.line_state.is_date_stamp_emitted = true;
            }
            if !self.config.prefix.is_unset() {
                sink.write_bytes(self.config.prefix_bytes())?;
            }
        }

        self.emit_quote(sink)?;

        self.scratch.clear();
        encode_into(&mut self.scratch, raw, self.config.relaxed);
        sink.write_bytes(&self.scratch)?;

        self.emit_quote(sink)?;

        self.line_state.within_line = true;
        ok!()
    }

    /// Emits the suffix if the current line has any item, then starts a new line.
    ///
    /// # Errors
    ///
    /// Any [`ChannelError`] from the sink.
    pub fn end_record(&mut self, sink: &mut impl RecordSink) -> Result<(), ChannelError> {
        if self.line_state.within_line {
            sink.write_bytes(self.config.suffix_bytes())?;
        }
        self.line_state.reset();
        ok!()
    }

    /// Emits all `items` followed by [`Self::end_record()`].
    ///
    /// # Errors
    ///
    /// Any [`ChannelError`] from the sink.
    pub fn format_record<'a>(
        &mut self,
        sink: &mut impl RecordSink,
        items: impl IntoIterator<Item = &'a [u8]>,
    ) -> Result<(), ChannelError> {
        for item in items {
            self.emit_item(sink, item)?;
        }
        self.end_record(sink)
    }

    fn emit_quote(&mut self, sink: &mut impl RecordSink) -> Result<(), ChannelError> {
        let cursor = match &self.quotes {
            QuoteCycle::Unset => return ok!(),
            // A NUL quote does not move the cursor.
            QuoteCycle::Nul => self.line_state.quote_cursor,
            QuoteCycle::Cycle(quotes) => self.line_state.advance_quote(quotes.len()),
        };
        if let Some(quote) = self.quotes.get(cursor) {
            sink.write_bytes(quote)?;
        }
        ok!()
    }
}
