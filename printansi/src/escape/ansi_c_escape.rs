// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns arbitrary bytes into printable ASCII using ANSI-C (`$'...'`) style escapes.
//!
//! | Input byte                 | Strict     | Relaxed |
//! | :------------------------- | :--------- | :------ |
//! | `0x21..=0x7e` (not `\` `'`) | as is      | as is   |
//! | `\`                        | `\\`       | `\\`    |
//! | `'`                        | `\'`       | `'`     |
//! | space                      | `\x20`     | space   |
//! | BEL BS TAB LF VT FF CR ESC | `\a` `\b` `\t` `\n` `\v` `\f` `\r` `\e` | same |
//! | anything else              | `\xHH`     | `\xHH`  |
//!
//! The output never contains a control byte, so it can't move the cursor, change colors,
//! or otherwise talk to the terminal.

mod escape_constants {
    pub const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
    pub const BEL: u8 = 0x07;
    pub const BS: u8 = 0x08;
    pub const VT: u8 = 0x0b;
    pub const FF: u8 = 0x0c;
    pub const ESC: u8 = 0x1b;
}

use escape_constants::{BEL, BS, ESC, FF, HEX_DIGITS, VT};

/// Escapes `raw` into a new buffer. See the [module docs](self) for the mapping.
#[must_use]
pub fn encode(raw: &[u8], relaxed: bool) -> Vec<u8> {
    let mut acc = Vec::with_capacity(raw.len());
    encode_into(&mut acc, raw, relaxed);
    acc
}

/// Same as [`encode()`], but appends to an existing buffer.
pub fn encode_into(acc: &mut Vec<u8>, raw: &[u8], relaxed: bool) {
    for &byte in raw {
        match byte {
            b'\\' => acc.extend_from_slice(b"\\\\"),
            b'\'' if !relaxed => acc.extend_from_slice(b"\\'"),
            b' ' if !relaxed => acc.extend_from_slice(b"\\x20"),
            BEL => acc.extend_from_slice(b"\\a"),
            BS => acc.extend_from_slice(b"\\b"),
            b'\t' => acc.extend_from_slice(b"\\t"),
            b'\n' => acc.extend_from_slice(b"\\n"),
            VT => acc.extend_from_slice(b"\\v"),
            FF => acc.extend_from_slice(b"\\f"),
            b'\r' => acc.extend_from_slice(b"\\r"),
            ESC => acc.extend_from_slice(b"\\e"),
            b' '..=b'~' => acc.push(byte),
            _ => acc.extend_from_slice(&[
                b'\\',
                b'x',
                HEX_DIGITS[usize::from(byte >> 4)],
                HEX_DIGITS[usize::from(byte & 0x0f)],
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(b"", false, "" ; "empty input")]
    #[test_case(b"hello", false, "hello" ; "plain ascii")]
    #[test_case(b"a b", false, r"a\x20b" ; "strict space")]
    #[test_case(b"a b", true, "a b" ; "relaxed space")]
    #[test_case(b"it's", false, r"it\'s" ; "strict quote")]
    #[test_case(b"it's", true, "it's" ; "relaxed quote")]
    #[test_case(b"back\\slash", true, r"back\\slash" ; "backslash always escaped")]
    #[test_case(b"\t\n\r", false, r"\t\n\r" ; "whitespace controls")]
    #[test_case(b"\x07\x08\x0b\x0c", false, r"\a\b\v\f" ; "other short escapes")]
    #[test_case(b"\x1b[31mred", false, r"\e[31mred" ; "escape sequence is defused")]
    #[test_case(b"\x00\x7f\xff", false, r"\x00\x7f\xff" ; "hex escapes")]
    #[test_case("äö".as_bytes(), true, r"\xc3\xa4\xc3\xb6" ; "utf8 is escaped bytewise")]
    fn test_encode(raw: &[u8], relaxed: bool, expected: &str) {
        let actual = encode(raw, relaxed);
        assert_eq!(String::from_utf8(actual).unwrap(), expected);
    }

    #[test]
    fn test_every_byte_is_printable_and_ansi_free() {
        let all_bytes: Vec<u8> = (0..=u8::MAX).collect();
        for relaxed in [false, true] {
            let encoded = encode(&all_bytes, relaxed);
            assert!(encoded.iter().all(|byte| (b' '..=b'~').contains(byte)));
            assert_eq!(strip_ansi_escapes::strip(&encoded), encoded);
        }
    }

    #[test]
    fn test_encode_into_appends() {
        let mut acc = b"> ".to_vec();
        encode_into(&mut acc, b"x y", true);
        assert_eq!(acc, b"> x y");
    }
}
