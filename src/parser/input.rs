//! Code point input
//!
//! The parsers pull one code point at a time and may hand the last one back
//! when it belongs to whatever comes next. [`CharSource`] is that contract;
//! [`CharReader`] implements it over any buffered byte reader.

use std::io::{self, BufRead};

use super::utf8::{Utf8Decoder, Utf8Result, REPLACEMENT_CHAR};

/// A sequential source of code points with one-slot push-back
pub trait CharSource {
    /// Next code point, or `None` at end of input
    fn next_char(&mut self) -> io::Result<Option<char>>;

    /// Return a code point so the next call to [`next_char`](Self::next_char)
    /// yields it again
    fn push_back(&mut self, c: char);
}

/// Decodes UTF-8 from a byte reader into code points
#[derive(Debug)]
pub struct CharReader<R> {
    reader: R,
    decoder: Utf8Decoder,
    /// Code point handed back by a parser
    pushed_back: Option<char>,
    /// Byte that interrupted a multi-byte sequence and still needs decoding
    retry: Option<u8>,
    /// U+FFFD still owed for the bytes of a malformed sequence
    replacements: usize,
}

impl<R: BufRead> CharReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: Utf8Decoder::new(),
            pushed_back: None,
            retry: None,
            replacements: 0,
        }
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// One U+FFFD now, the rest of `count` on the following calls
    fn replace(&mut self, count: usize) -> Option<char> {
        self.replacements = count.saturating_sub(1);
        Some(REPLACEMENT_CHAR)
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.retry.take() {
            return Ok(Some(byte));
        }

        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            let Some(&byte) = buf.first() else {
                return Ok(None);
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }
}

impl<R: BufRead> CharSource for CharReader<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.pushed_back.take() {
            return Ok(Some(c));
        }
        if self.replacements > 0 {
            self.replacements -= 1;
            return Ok(Some(REPLACEMENT_CHAR));
        }

        loop {
            let Some(byte) = self.next_byte()? else {
                // Each byte of a sequence cut off by end of input
                return match self.decoder.finish() {
                    0 => Ok(None),
                    pending => Ok(self.replace(pending)),
                };
            };

            match self.decoder.feed(byte) {
                Utf8Result::Pending => continue,
                Utf8Result::Char(c) => return Ok(Some(c)),
                Utf8Result::Invalid => return Ok(Some(REPLACEMENT_CHAR)),
                Utf8Result::Interrupted(consumed) => {
                    self.retry = Some(byte);
                    return Ok(self.replace(consumed));
                }
            }
        }
    }

    fn push_back(&mut self, c: char) {
        debug_assert!(self.pushed_back.is_none(), "only one code point can be pushed back");
        self.pushed_back = Some(c);
    }
}
