//! Character-at-a-time reader with one slot of pushback.
//!
//! Decodes UTF-8 from any `io::Read` and tracks the position of the
//! next character to be read.

use std::io::{self, BufReader, Read};

use crate::lexer::LexErrorKind;
use crate::token::Position;

/// Buffered character source with line/column tracking.
pub struct CharacterSource<R> {
    reader: BufReader<R>,
    line: usize,
    column: usize,
    // Column the previous line ended at, restored when a newline is
    // pushed back.
    prev_line_column: usize,
    pushed: Option<char>,
    // Character returned by the latest `next_char`, the only one that
    // may be pushed back.
    last: Option<char>,
    started: bool,
    at_eof: bool,
}

impl<R: Read> CharacterSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line: 1,
            column: 1,
            prev_line_column: 1,
            pushed: None,
            last: None,
            started: false,
            at_eof: false,
        }
    }

    /// Position of the next character to be read.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Whether end of input has been reached.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.at_eof && self.pushed.is_none()
    }

    /// Consume one character. `Ok(None)` means end of input, and
    /// stays that way on every later call.
    pub fn next_char(&mut self) -> Result<Option<char>, LexErrorKind> {
        let c = if let Some(c) = self.pushed.take() {
            c
        } else {
            self.last = None;
            if self.at_eof {
                return Ok(None);
            }
            match self.read_char()? {
                Some(c) => c,
                None => {
                    self.at_eof = true;
                    return Ok(None);
                }
            }
        };
        self.last = Some(c);

        if c == '\n' {
            self.prev_line_column = self.column;
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(Some(c))
    }

    /// Return the character just read to the stream.
    ///
    /// Only one character may be pending; a second call before the
    /// next `next_char()` fails with `DoublePushback`. Pushing back
    /// anything other than the character the latest `next_char()`
    /// returned fails with `InvalidPushback`. Rejected calls change
    /// nothing.
    pub fn push_back(&mut self, c: char) -> Result<(), LexErrorKind> {
        if self.pushed.is_some() {
            return Err(LexErrorKind::DoublePushback);
        }
        if self.last != Some(c) {
            return Err(LexErrorKind::InvalidPushback(c));
        }
        self.last = None;
        if c == '\n' {
            self.line -= 1;
            self.column = self.prev_line_column;
        } else {
            self.column -= 1;
        }
        self.pushed = Some(c);
        Ok(())
    }

    fn read_char(&mut self) -> Result<Option<char>, LexErrorKind> {
        loop {
            let Some(c) = self.decode_char()? else {
                return Ok(None);
            };
            let first = !self.started;
            self.started = true;
            if first && c == '\u{FEFF}' {
                continue;
            }
            return Ok(Some(c));
        }
    }

    fn decode_char(&mut self) -> Result<Option<char>, LexErrorKind> {
        let mut buf = [0u8; 4];
        if !self.read_byte(&mut buf[0])? {
            return Ok(None);
        }
        let width = utf8_width(buf[0]).ok_or_else(invalid_utf8)?;
        for slot in &mut buf[1..width] {
            if !self.read_byte(slot)? {
                return Err(invalid_utf8());
            }
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(invalid_utf8)
    }

    fn read_byte(&mut self, out: &mut u8) -> Result<bool, LexErrorKind> {
        loop {
            match self.reader.read(std::slice::from_mut(out)) {
                Ok(0) => return Ok(false),
                Ok(_) => return Ok(true),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

const fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8() -> LexErrorKind {
    LexErrorKind::Io {
        kind: io::ErrorKind::InvalidData,
        message: "stream did not contain valid UTF-8".to_string(),
    }
}
