use heapless::Vec;

use crate::reading::parse_line;
use crate::{ParseError, Reading};

/// Splits a serial byte stream on `\n` and parses each line into a [`Reading`].
///
/// Holds at most `N` bytes of a pending line. A longer line is dropped and
/// reported once its terminator arrives.
pub struct LineDecoder<const N: usize> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineDecoder<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feeds one byte. Returns a result each time a non-empty line is terminated.
    pub fn push(&mut self, byte: u8) -> Option<Result<Reading, ParseError>> {
        if byte != b'\n' {
            if !self.overflowed && self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        if self.overflowed {
            self.reset();
            warn!("Dropped line longer than {=usize} bytes", N);
            return Some(Err(ParseError::LineTooLong));
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(line) if line.trim_end_matches('\r').is_empty() => None,
            Ok(line) => Some(parse_line(line)),
            Err(_) => Some(Err(ParseError::InvalidEncoding)),
        };
        self.reset();
        result
    }

    /// Bytes of the current, unterminated line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}

impl<const N: usize> Default for LineDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}
