// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::ConfigString;

pub mod format_defaults {
    /// Emitted between two items of the same line when no separator is configured.
    pub const SEPARATOR: &[u8] = b" ";
    /// Emitted at the end of each line when no suffix is configured.
    pub const SUFFIX: &[u8] = b"\n";
    /// Nothing is emitted at the start of a line when no prefix is configured.
    pub const PREFIX: &[u8] = b"";
}

/// Everything the [`crate::FormattingPipeline`] needs to know about how to wrap each
/// item. Built once from the command line, see [`crate::CLIArg::format_config()`], and
/// never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatConfig {
    pub prefix: ConfigString,
    pub suffix: ConfigString,
    pub separator: ConfigString,
    /// Characters of this string are emitted round robin before and after each payload.
    pub quote: ConfigString,
    /// Leave plain spaces and single quotes unescaped.
    pub relaxed: bool,
    /// Start each line with a UTC `[YYYYMMDD-HHMMSS]` stamp.
    pub date_stamp: bool,
}

impl FormatConfig {
    #[must_use]
    pub fn prefix_bytes(&self) -> &[u8] { self.prefix.resolve(format_defaults::PREFIX) }

    #[must_use]
    pub fn suffix_bytes(&self) -> &[u8] { self.suffix.resolve(format_defaults::SUFFIX) }

    #[must_use]
    pub fn separator_bytes(&self) -> &[u8] {
        self.separator.resolve(format_defaults::SEPARATOR)
    }
}
