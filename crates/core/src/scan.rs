//! Byte-level helpers shared by the tokenizers.

use crate::token::Token;
use alloc::vec::Vec;
use core::mem;

/// Removes a trailing `\n` and then a trailing `\r` from a raw line.
pub fn strip_line_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

/// Length of the UTF-8 sequence introduced by `lead`.
///
/// Bytes that cannot start a sequence (continuation bytes, `0xC0`, `0xC1`,
/// `0xF5..`) count as a sequence of one.
#[must_use]
pub const fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Whether `seq`, a single UTF-8 sequence or a lone invalid byte, is whitespace.
///
/// Invalid sequences are never whitespace.
#[must_use]
pub fn is_space(seq: &[u8]) -> bool {
    match seq {
        [b] if b.is_ascii() => matches!(*b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r'),
        _ => core::str::from_utf8(seq)
            .ok()
            .and_then(|s| s.chars().next())
            .is_some_and(char::is_whitespace),
    }
}

/// Incremental word splitter for bytes arriving in arbitrary chunks.
///
/// Sequences cut by a chunk boundary are held back until the next chunk, so a
/// multi-byte space split across two reads still separates words.
#[derive(Debug, Default)]
pub struct WordSplitter {
    word: Vec<u8>,
    pending: Vec<u8>,
}

impl WordSplitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `chunk` until a word is completed.
    ///
    /// Returns how many bytes of `chunk` were consumed together with the
    /// completed word, if any. Bytes after the consumed prefix are untouched and
    /// must be fed again.
    pub fn feed(&mut self, chunk: &[u8]) -> (usize, Option<Token>) {
        for (i, &byte) in chunk.iter().enumerate() {
            if let Some(word) = self.push(byte) {
                return (i + 1, Some(word));
            }
        }
        (chunk.len(), None)
    }

    /// Flushes whatever is buffered at end of stream.
    pub fn finish(&mut self) -> Option<Token> {
        self.word.append(&mut self.pending);
        self.take_word()
    }

    fn push(&mut self, byte: u8) -> Option<Token> {
        if !self.pending.is_empty() && !is_continuation(byte) {
            // truncated sequence, its bytes are word content
            self.word.append(&mut self.pending);
        }
        self.pending.push(byte);
        if self.pending.len() < utf8_width(self.pending[0]) {
            return None;
        }

        if is_space(&self.pending) {
            self.pending.clear();
            self.take_word()
        } else {
            self.word.append(&mut self.pending);
            None
        }
    }

    fn take_word(&mut self) -> Option<Token> {
        if self.word.is_empty() {
            None
        } else {
            Some(Token::new(mem::take(&mut self.word)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn split_all(chunks: &[&[u8]]) -> Vec<Vec<u8>> {
        let mut splitter = WordSplitter::new();
        let mut words = Vec::new();
        for chunk in chunks {
            let mut rest = *chunk;
            while !rest.is_empty() {
                let (used, word) = splitter.feed(rest);
                rest = &rest[used..];
                words.extend(word.map(Token::into_bytes));
            }
        }
        words.extend(splitter.finish().map(Token::into_bytes));
        words
    }

    #[test]
    fn strips_lf_and_crlf() {
        let mut line = b"abc\r\n".to_vec();
        strip_line_terminator(&mut line);
        assert_eq!(line, b"abc");

        let mut line = b"abc\n".to_vec();
        strip_line_terminator(&mut line);
        assert_eq!(line, b"abc");

        let mut line = b"abc".to_vec();
        strip_line_terminator(&mut line);
        assert_eq!(line, b"abc");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let words = split_all(&[b"  hello   world  "]);
        assert_eq!(words, vec![b"hello".to_vec(), b"world".to_vec()]);
    }

    #[test]
    fn all_whitespace_yields_nothing() {
        assert!(split_all(&[b" \t\r\n\x0b\x0c "]).is_empty());
        assert!(split_all(&[]).is_empty());
    }

    #[test]
    fn word_spanning_chunks() {
        let words = split_all(&[b"hel", b"lo wo", b"rld"]);
        assert_eq!(words, vec![b"hello".to_vec(), b"world".to_vec()]);
    }

    #[test]
    fn unicode_space_split_across_chunks() {
        // U+3000 IDEOGRAPHIC SPACE = E3 80 80
        let words = split_all(&[b"a\xE3", b"\x80", b"\x80b"]);
        assert_eq!(words, vec![b"a".to_vec(), b"b".to_vec()]);

        // U+00A0 NO-BREAK SPACE
        let words = split_all(&["x\u{a0}y".as_bytes()]);
        assert_eq!(words, vec![b"x".to_vec(), b"y".to_vec()]);
    }

    #[test]
    fn invalid_utf8_is_word_content() {
        let words = split_all(&[b"\xFF\xFE ok \xE3\x80 z"]);
        assert_eq!(
            words,
            vec![b"\xFF\xFE".to_vec(), b"ok".to_vec(), b"\xE3\x80".to_vec(), b"z".to_vec()]
        );
    }

    #[test]
    fn non_space_multibyte_stays_in_word() {
        let words = split_all(&["héllo wörld".as_bytes()]);
        assert_eq!(words, vec!["héllo".as_bytes().to_vec(), "wörld".as_bytes().to_vec()]);
    }
}
