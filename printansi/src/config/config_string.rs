// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{ffi::OsString, os::unix::ffi::OsStringExt};

/// A single NUL byte. This is what an explicitly empty string option turns into.
pub const NUL: &[u8] = b"\0";

/// A user configurable string (prefix, suffix, separator, quote cycle) has three
/// distinct states:
///
/// | Given on the command line | Variant                 | Emitted bytes      |
/// | :------------------------ | :---------------------- | :----------------- |
/// | not at all                | [`ConfigString::Unset`] | the default        |
/// | `-s ''`                   | [`ConfigString::Empty`] | a single NUL byte  |
/// | `-s ';'`                  | [`ConfigString::Literal`] | the literal bytes |
///
/// Values are kept as raw bytes since command line arguments are not guaranteed to be
/// valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigString {
    #[default]
    Unset,
    Empty,
    Literal(Vec<u8>),
}

impl ConfigString {
    /// Returns the bytes to emit for this string, falling back to `default` when unset.
    #[must_use]
    pub fn resolve<'a>(&'a self, default: &'a [u8]) -> &'a [u8] {
        match self {
            ConfigString::Unset => default,
            ConfigString::Empty => NUL,
            ConfigString::Literal(bytes) => bytes,
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool { matches!(self, ConfigString::Unset) }
}

impl From<Option<OsString>> for ConfigString {
    fn from(maybe_value: Option<OsString>) -> Self {
        match maybe_value {
            None => ConfigString::Unset,
            Some(value) if value.is_empty() => ConfigString::Empty,
            Some(value) => ConfigString::Literal(value.into_vec()),
        }
    }
}

impl From<Option<&str>> for ConfigString {
    fn from(maybe_value: Option<&str>) -> Self {
        maybe_value.map(OsString::from).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(None, b"\n", b"\n" ; "unset uses default")]
    #[test_case(Some(""), b"\n", b"\0" ; "empty uses nul")]
    #[test_case(Some("--"), b"\n", b"--" ; "literal is used as is")]
    #[test_case(None, b"", b"" ; "unset with empty default emits nothing")]
    fn test_resolve(given: Option<&str>, default: &[u8], expected: &[u8]) {
        let it = ConfigString::from(given);
        assert_eq!(it.resolve(default), expected);
    }

    #[test]
    fn test_non_utf8_bytes_survive() {
        let raw = OsString::from_vec(vec![0xff, b'x', 0xfe]);
        let it = ConfigString::from(Some(raw));
        assert_eq!(it, ConfigString::Literal(vec![0xff, b'x', 0xfe]));
    }

    #[test]
    fn test_default_is_unset() {
        assert!(ConfigString::default().is_unset());
        assert!(!ConfigString::Empty.is_unset());
    }
}
