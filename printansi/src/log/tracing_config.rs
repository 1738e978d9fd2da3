// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Where and how much to log. Display output always goes to stderr, since stdout may be
/// the output channel.
///
/// Fields:
/// - `writer_config`: [`WriterConfig`] to choose where to write the logs.
/// - `level_filter`: [`LevelFilter`] to use for all layers.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `DisplayAndFile`: the [`String`] is the log file path, eg: `/tmp/printansi.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    Display,
    DisplayAndFile(String /* tracing_log_file_path */),
}

impl TracingConfig {
    /// Errors only, unless `verbose`. Input read errors are logged at error level, so
    /// they always show.
    #[must_use]
    pub fn new(verbose: bool, maybe_log_file: Option<String>) -> Self {
        Self {
            writer_config: match maybe_log_file {
                Some(path) => WriterConfig::DisplayAndFile(path),
                None => WriterConfig::Display,
            },
            level_filter: if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::ERROR
            },
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quiet_by_default() {
        let config = TracingConfig::new(false, None);
        assert_eq!(config.get_level_filter(), LevelFilter::ERROR);
        assert_eq!(config.get_writer_config(), WriterConfig::Display);
    }

    #[test]
    fn test_verbose_with_log_file() {
        let config = TracingConfig::new(true, Some("/tmp/printansi.log".into()));
        assert_eq!(config.get_level_filter(), LevelFilter::DEBUG);
        assert_eq!(
            config.get_writer_config(),
            WriterConfig::DisplayAndFile("/tmp/printansi.log".into())
        );
    }
}
