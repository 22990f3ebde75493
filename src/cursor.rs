//! Forward-only cursor over URI text.

use crate::error::UriErrorKind;
use crate::pct;

/// A position in borrowed input that only moves forward, except through an
/// explicit [`rewind`](Cursor::rewind) to a previously saved position.
///
/// # Invariants
///
/// `pos <= input.len()` and `pos` is always on a UTF-8 boundary, because
/// every consuming method stops on an ASCII byte or at the end of input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn rewind(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
    }

    /// Consumes `c` if it is next.
    pub(crate) fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `s` if the remaining input starts with it.
    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes one byte if it satisfies `pred`.
    pub(crate) fn eat_if(&mut self, pred: impl Fn(u8) -> bool) -> Option<u8> {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += 1;
                Some(c)
            }
            _ => None,
        }
    }

    /// Consumes the maximal run of bytes satisfying `pred`.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && pred(bytes[self.pos]) {
            self.pos += 1;
        }
        self.slice_from(start)
    }

    /// Consumes everything up to (not including) the first byte satisfying
    /// `stop`, or to the end of input.
    pub(crate) fn eat_until(&mut self, stop: impl Fn(u8) -> bool) -> &'a str {
        self.eat_while(|c| !stop(c))
    }

    /// Consumes and decodes a run of `pred` characters interleaved with
    /// percent-encoded octets.
    ///
    /// Stops at the first byte that is neither `%` nor in `pred`.
    ///
    /// # Errors
    ///
    /// `InvalidPercentEncoding` if a `%` is not followed by two hex digits
    /// or the decoded octets are not valid UTF-8.
    pub(crate) fn eat_with_pct(
        &mut self,
        pred: impl Fn(u8) -> bool,
    ) -> Result<String, UriErrorKind> {
        let mut decoded = Vec::new();
        loop {
            decoded.extend_from_slice(self.eat_while(&pred).as_bytes());
            if self.eat(b'%') {
                decoded.push(self.eat_pct_octet()?);
            } else {
                break;
            }
        }
        String::from_utf8(decoded).map_err(|_| UriErrorKind::InvalidPercentEncoding)
    }

    /// Decodes the two hex digits following an already consumed `%`.
    pub(crate) fn eat_pct_octet(&mut self) -> Result<u8, UriErrorKind> {
        let hi = self
            .eat_if(|c| c.is_ascii_hexdigit())
            .ok_or(UriErrorKind::InvalidPercentEncoding)?;
        let lo = self
            .eat_if(|c| c.is_ascii_hexdigit())
            .ok_or(UriErrorKind::InvalidPercentEncoding)?;
        Ok((pct::hex_value(hi) << 4) | pct::hex_value(lo))
    }
}
