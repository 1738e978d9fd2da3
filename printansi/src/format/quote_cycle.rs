// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConfigString, NUL};
use smallvec::SmallVec;

/// One quote, a single character. Four bytes fit any UTF-8 encoded `char`.
pub type Quote = SmallVec<[u8; 4]>;

/// The quotes emitted round robin around each payload.
///
/// A valid UTF-8 string is split into characters, so `-q «»` quotes with `«` then `»`.
/// Anything else is split into bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuoteCycle {
    /// No quoting at all.
    #[default]
    Unset,
    /// The quote string was explicitly empty: each quote is a single NUL.
    Nul,
    /// Never empty.
    Cycle(Vec<Quote>),
}

impl QuoteCycle {
    /// Number of distinct quotes, the cursor wraps at this value.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            QuoteCycle::Unset => 0,
            QuoteCycle::Nul => 1,
            QuoteCycle::Cycle(quotes) => quotes.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { matches!(self, QuoteCycle::Unset) }

    /// The bytes of the quote at `cursor`, or `None` if quoting is off.
    #[must_use]
    pub fn get(&self, cursor: usize) -> Option<&[u8]> {
        match self {
            QuoteCycle::Unset => None,
            QuoteCycle::Nul => Some(NUL),
            QuoteCycle::Cycle(quotes) => quotes.get(cursor).map(SmallVec::as_slice),
        }
    }
}

impl From<&ConfigString> for QuoteCycle {
    fn from(config: &ConfigString) -> Self {
        match config {
            ConfigString::Unset => QuoteCycle::Unset,
            ConfigString::Empty => QuoteCycle::Nul,
            ConfigString::Literal(bytes) if bytes.is_empty() => QuoteCycle::Nul,
            ConfigString::Literal(bytes) => QuoteCycle::Cycle(split_quotes(bytes)),
        }
    }
}

fn split_quotes(bytes: &[u8]) -> Vec<Quote> {
    match std::str::from_utf8(bytes) {
        Ok(text) => text
            .chars()
            .map(|ch| {
                let mut buffer = [0_u8; 4];
                Quote::from_slice(ch.encode_utf8(&mut buffer).as_bytes())
            })
            .collect(),
        Err(_) => bytes.iter().map(|byte| Quote::from_slice(&[*byte])).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_unset_means_no_quotes() {
        let cycle = QuoteCycle::from(&ConfigString::Unset);
        assert!(cycle.is_empty());
        assert_eq!(cycle.get(0), None);
    }

    #[test]
    fn test_empty_means_nul() {
        let cycle = QuoteCycle::from(&ConfigString::Empty);
        assert_eq!(cycle.len(), 1);
        assert_eq!(cycle.get(0), Some(&b"\0"[..]));
    }

    #[test_case("'", &["'"] ; "single ascii")]
    #[test_case("<>", &["<", ">"] ; "pair")]
    #[test_case("«»", &["«", "»"] ; "multibyte chars")]
    fn test_split_utf8(input: &str, expected: &[&str]) {
        let cycle = QuoteCycle::from(&ConfigString::Literal(input.as_bytes().to_vec()));
        assert_eq!(cycle.len(), expected.len());
        for (index, quote) in expected.iter().enumerate() {
            assert_eq!(cycle.get(index), Some(quote.as_bytes()));
        }
    }

    #[test]
    fn test_split_invalid_utf8_per_byte() {
        let cycle = QuoteCycle::from(&ConfigString::Literal(vec![0xff, b'"']));
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle.get(0), Some(&[0xff_u8][..]));
        assert_eq!(cycle.get(1), Some(&b"\""[..]));
    }
}
