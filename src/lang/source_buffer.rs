use std::str::Chars;

/// A forward-only cursor over a single line of source text.
///
/// The outer interpreter and compiler both need to consume a line token-at-a-time while
/// occasionally reaching past normal tokenization to scan a quoted string (`."`, `LOAD "..."`)
/// directly out of the remaining text, exactly as the original source's `strtok_r` plus manual
/// quote-scanning does. A `SourceBuffer` is the one cursor both phases share.
///
/// Only holds a reference to the line; the line is expected to outlive the buffer.
pub struct SourceBuffer<'a> {
    chars: Chars<'a>,
    current: Option<char>,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(line: &'a str) -> SourceBuffer<'a> {
        SourceBuffer { chars: line.chars(), current: None }
    }

    /// Look at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char> {
        if self.current.is_none() {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Consume and return the next character.
    pub fn next_char(&mut self) -> Option<char> {
        match self.current.take() {
            Some(next) => Some(next),
            None => self.chars.next(),
        }
    }

    /// Is there anything left to read?
    pub fn is_empty(&mut self) -> bool {
        self.peek_next().is_none()
    }

    /// Skip over spaces and tabs, stopping at the next non-whitespace character or the end of
    /// the buffer.
    pub fn skip_whitespace(&mut self) {
        while let Some(next) = self.peek_next() {
            if !is_whitespace(next) {
                break;
            }

            let _ = self.next_char();
        }
    }

    /// Consume and return characters up to (but not including) the next whitespace character or
    /// the end of the buffer.
    pub fn take_until_whitespace(&mut self) -> String {
        let mut text = String::new();

        while let Some(next) = self.peek_next() {
            if is_whitespace(next) {
                break;
            }

            text.push(self.next_char().unwrap());
        }

        text
    }

    /// Consume and return characters up to (but not including) the next `"`, without consuming
    /// that closing quote. Returns `None` if the buffer runs out first.
    pub fn take_until_quote(&mut self) -> Option<String> {
        let mut text = String::new();

        loop {
            match self.peek_next() {
                Some('"') => return Some(text),
                Some(_) => text.push(self.next_char().unwrap()),
                None => return None,
            }
        }
    }
}

/// Whitespace: spaces and tabs (a line has already had its newline stripped).
fn is_whitespace(next: char) -> bool {
    next == ' ' || next == '\t' || next == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let mut buffer = SourceBuffer::new("  DUP   SWAP");
        buffer.skip_whitespace();
        assert_eq!(buffer.take_until_whitespace(), "DUP");
        buffer.skip_whitespace();
        assert_eq!(buffer.take_until_whitespace(), "SWAP");
    }

    #[test]
    fn reads_up_to_closing_quote() {
        let mut buffer = SourceBuffer::new("hello\" world");
        assert_eq!(buffer.take_until_quote().as_deref(), Some("hello"));
        assert_eq!(buffer.next_char(), Some('"'));
    }

    #[test]
    fn missing_closing_quote_is_none() {
        let mut buffer = SourceBuffer::new("hello world");
        assert_eq!(buffer.take_until_quote(), None);
    }
}
