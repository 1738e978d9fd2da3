// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// The log file is never rolled over, it is simply appended to.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
/// - The parent folder can't be created, or the file can't be opened
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            help = "Pass a path to a file, eg: `--log-file /tmp/printansi.log`",
            "Can't use {} as a log file, it has no parent folder",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            help = "Pass a path to a file, eg: `--log-file /tmp/printansi.log`",
            "Can't use {} as a log file, it has no file name",
            path.display()
        )
    })?;

    // `rolling::never()` panics if the file can't be created, the builder reports it.
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_path_without_file_name() {
        assert!(try_create("/").is_err());
    }

    #[test]
    fn test_parent_that_is_a_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        std::fs::write(&plain, b"not a folder").unwrap();
        let path = plain.join("printansi.log");

        assert!(try_create(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_creates_file_lazily_in_existing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printansi.log");
        let appender = try_create(path.to_str().unwrap());
        assert!(appender.is_ok());
    }
}
