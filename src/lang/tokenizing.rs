use crate::{
    lang::source_buffer::SourceBuffer,
    runtime::{data_structures::bigint::Int, error},
};
use std::fmt::{self, Display, Formatter};

/// A single unit of Strange Forth-dialect source: either a decimal integer literal or a bare
/// word (a primitive name, a user word name, or one of the control-flow keywords).
///
/// Quoted text (`."` and `LOAD`'s filename argument) is deliberately not a token variant here: it
/// is scanned directly out of the remaining line text by whoever consumed the `."`/`LOAD`
/// keyword token, not tokenized up front.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Number(Int),
    Word(String),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Word(word) => write!(f, "{}", word),
        }
    }
}

/// A cursor that pulls one token at a time out of a line of source, and can drop down to
/// character-level scanning for the quoted-string forms of `."` and `LOAD`.
///
/// This one cursor is shared by the outer interpreter and the structured control compiler: both
/// consume tokens from it in turn, and both occasionally need to read past the next whitespace
/// boundary for a quoted argument.
pub struct TokenStream<'a> {
    buffer: SourceBuffer<'a>,
}

impl<'a> TokenStream<'a> {
    pub fn new(line: &'a str) -> TokenStream<'a> {
        TokenStream { buffer: SourceBuffer::new(line) }
    }

    /// Pull the next whitespace-delimited token, classifying it as a number or a bare word.
    pub fn next_token(&mut self) -> Option<Token> {
        self.buffer.skip_whitespace();

        if self.buffer.is_empty() {
            return None;
        }

        let text = self.buffer.take_until_whitespace();

        match Int::parse_decimal(&text) {
            Some(value) => Some(Token::Number(value)),
            None => Some(Token::Word(text)),
        }
    }

    /// Pull the next whitespace-delimited token as raw text, regardless of whether it looks
    /// numeric. Used for `FORGET`'s and `VARIABLE`'s name argument.
    pub fn next_word_text(&mut self) -> error::Result<String> {
        self.buffer.skip_whitespace();

        if self.buffer.is_empty() {
            return error::script_error_str("Expected a word but found end of line");
        }

        Ok(self.buffer.take_until_whitespace())
    }

    /// Read a double-quoted string out of the remaining line: leading spaces and tabs are
    /// skipped, the next character must be `"`, and the string extends up to (but not including)
    /// the next `"` on the same line. No escape sequences.
    ///
    /// Used for `LOAD "path"`, whose keyword has no quote character of its own — the opening
    /// quote is a separate token the caller must still find.
    pub fn read_quoted_string(&mut self) -> error::Result<String> {
        self.buffer.skip_whitespace();

        if self.buffer.next_char() != Some('"') {
            return error::script_error_str("Expected opening quote");
        }

        match self.buffer.take_until_quote() {
            Some(text) => {
                let _ = self.buffer.next_char(); // consume the closing quote
                Ok(text)
            }
            None => error::script_error_str("Missing closing quote"),
        }
    }

    /// Read the text argument of `."`. Unlike `LOAD`, the `."` keyword's own spelling already
    /// ends in the opening quote (`forth_gmp.c`'s `."` case scans straight from `saveptr` to the
    /// next `"` with no separate opening-quote check); only the single space separating the
    /// keyword from its text needs skipping, then the text runs up to the next `"` on the same
    /// line.
    pub fn read_dot_quote_text(&mut self) -> error::Result<String> {
        self.buffer.skip_whitespace();

        match self.buffer.take_until_quote() {
            Some(text) => {
                let _ = self.buffer.next_char(); // consume the closing quote
                Ok(text)
            }
            None => error::script_error_str("Missing closing quote for .\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_numbers_and_words() {
        let mut tokens = TokenStream::new("42 -7 DUP");
        assert_eq!(tokens.next_token(), Some(Token::Number(Int::from_i64(42))));
        assert_eq!(tokens.next_token(), Some(Token::Number(Int::from_i64(-7))));
        assert_eq!(tokens.next_token(), Some(Token::Word("DUP".to_string())));
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn reads_quoted_string_after_keyword() {
        let mut tokens = TokenStream::new("\"hello world\" DUP");
        assert_eq!(tokens.read_quoted_string().unwrap(), "hello world");
        assert_eq!(tokens.next_token(), Some(Token::Word("DUP".to_string())));
    }

    #[test]
    fn missing_opening_quote_is_error() {
        let mut tokens = TokenStream::new("hello\"");
        assert!(tokens.read_quoted_string().is_err());
    }

    #[test]
    fn dot_quote_text_needs_no_separate_opening_quote() {
        // The `."` token itself already ends in the opening quote; only the mandatory
        // separating space before the text remains in the buffer.
        let mut tokens = TokenStream::new(" hello \"");
        assert_eq!(tokens.read_dot_quote_text().unwrap(), "hello ");
    }

    #[test]
    fn dot_quote_text_without_closing_quote_is_error() {
        let mut tokens = TokenStream::new(" hello");
        assert!(tokens.read_dot_quote_text().is_err());
    }
}
