//! Streaming UTF-8 decoding
//!
//! Input arrives as bytes; the filter works on code points. Malformed input
//! never fails: every byte that is not part of a well-formed character
//! decodes to its own U+FFFD, and decoding resumes at the byte after it.

use std::ops::RangeInclusive;

/// Replacement for undecodable input
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

const CONTINUATION: RangeInclusive<u8> = 0x80..=0xBF;

/// UTF-8 decoder state
#[derive(Debug, Clone)]
pub struct Utf8Decoder {
    /// Bytes accumulated for current character
    buffer: [u8; 4],
    /// Number of bytes in buffer
    len: usize,
    /// Expected total bytes for current character
    expected: usize,
    /// Accepted range for the next byte
    accept: RangeInclusive<u8>,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self {
            buffer: [0; 4],
            len: 0,
            expected: 0,
            accept: CONTINUATION,
        }
    }
}

/// Result of feeding a byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Result {
    /// Need more bytes
    Pending,
    /// Successfully decoded a character
    Char(char),
    /// Invalid lead byte, the byte was consumed
    Invalid,
    /// A pending sequence was cut short by this byte. Each of the given
    /// number of bytes consumed before it decodes to U+FFFD; the byte itself
    /// was not consumed and must be fed again
    Interrupted(usize),
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the decoder state
    pub fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
        self.accept = CONTINUATION;
    }

    /// Check if decoder is in the middle of a sequence
    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// End of input: the number of pending bytes, each owed a U+FFFD
    pub fn finish(&mut self) -> usize {
        let pending = self.len;
        self.reset();
        pending
    }

    /// Feed a byte to the decoder
    pub fn feed(&mut self, byte: u8) -> Utf8Result {
        if self.len == 0 {
            return self.start(byte);
        }

        if !self.accept.contains(&byte) {
            return Utf8Result::Interrupted(self.finish());
        }

        self.buffer[self.len] = byte;
        self.len += 1;
        self.accept = CONTINUATION;
        if self.len < self.expected {
            return Utf8Result::Pending;
        }

        let result = self.decode();
        self.reset();
        result
    }

    fn start(&mut self, byte: u8) -> Utf8Result {
        // The second byte's range excludes overlong forms, surrogates and
        // values past U+10FFFF
        let (expected, accept) = match byte {
            0x00..=0x7F => return Utf8Result::Char(byte as char),
            0xC2..=0xDF => (2, CONTINUATION),
            0xE0 => (3, 0xA0..=0xBF),
            0xED => (3, 0x80..=0x9F),
            0xE1..=0xEF => (3, CONTINUATION),
            0xF0 => (4, 0x90..=0xBF),
            0xF4 => (4, 0x80..=0x8F),
            0xF1..=0xF3 => (4, CONTINUATION),
            // Continuation bytes, overlong leads and out-of-range leads
            _ => return Utf8Result::Invalid,
        };

        self.buffer[0] = byte;
        self.len = 1;
        self.expected = expected;
        self.accept = accept;
        Utf8Result::Pending
    }

    fn decode(&self) -> Utf8Result {
        let b = &self.buffer;
        let cp = match self.expected {
            2 => (b[0] as u32 & 0x1F) << 6 | (b[1] as u32 & 0x3F),
            3 => (b[0] as u32 & 0x0F) << 12 | (b[1] as u32 & 0x3F) << 6 | (b[2] as u32 & 0x3F),
            4 => {
                (b[0] as u32 & 0x07) << 18
                    | (b[1] as u32 & 0x3F) << 12
                    | (b[2] as u32 & 0x3F) << 6
                    | (b[3] as u32 & 0x3F)
            }
            _ => return Utf8Result::Invalid,
        };

        char::from_u32(cp).map_or(Utf8Result::Invalid, Utf8Result::Char)
    }
}
