//! Sequential reader over the intermediate code token stream.
//!
//! The intermediate code is untrusted input: every read is bounds checked and
//! reports a [`ConstructError`] carrying the byte span of the offending token.

mod lexer;

use core::ops::Range;

use logos::Logos;

use crate::errors::{ConstructError, ErrorKind};
use lexer::RawToken;

/// Byte range inside the intermediate code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }

    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

/// A single token together with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub text: &'src str,
    pub span: Span,
}

impl Token<'_> {
    /// The token as a one character tag, if it is one.
    pub fn tag(&self) -> Option<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

pub struct TokenReader<'src> {
    source: &'src str,
    lexer: logos::Lexer<'src, RawToken>,
    max_token_length: usize,
}

impl<'src> TokenReader<'src> {
    pub fn new(source: &'src str, max_token_length: usize) -> Self {
        Self {
            source,
            lexer: RawToken::lexer(source),
            max_token_length,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    fn end_span(&self) -> Span {
        Span::new(self.source.len(), self.source.len())
    }

    fn next_word(&mut self) -> Result<Option<Token<'src>>, ConstructError> {
        loop {
            match self.lexer.next() {
                None => return Ok(None),
                Some(Ok(RawToken::Comment)) => continue,
                Some(Ok(RawToken::Word)) => {
                    let span = self.lexer.span();
                    return Ok(Some(Token {
                        text: self.lexer.slice(),
                        span: Span(span),
                    }));
                }
                Some(Err(())) => {
                    return Err(ConstructError::new(
                        ErrorKind::UnrecognizedInput {
                            text: self.lexer.slice().to_string(),
                        },
                        Span(self.lexer.span()),
                    ));
                }
            }
        }
    }

    /// Reads the next token.
    pub fn read_string(&mut self) -> Result<Token<'src>, ConstructError> {
        let token = self
            .next_word()?
            .ok_or_else(|| ConstructError::new(ErrorKind::UnexpectedEnd, self.end_span()))?;
        if token.text.len() > self.max_token_length {
            return Err(ConstructError::new(
                ErrorKind::TokenTooLong {
                    length: token.text.len(),
                    max: self.max_token_length,
                },
                token.span,
            ));
        }
        Ok(token)
    }

    /// Reads the next token as a finite decimal literal.
    pub fn read_value(&mut self) -> Result<(f64, Span), ConstructError> {
        let token = self.read_string()?;
        match token.text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok((value, token.span)),
            _ => Err(ConstructError::new(
                ErrorKind::InvalidValue {
                    found: token.text.to_string(),
                },
                token.span,
            )),
        }
    }

    /// Reads the next token as a non-negative integer count.
    pub fn read_count(&mut self) -> Result<(usize, Span), ConstructError> {
        let token = self.read_string()?;
        token
            .text
            .parse::<usize>()
            .map(|count| (count, token.span.clone()))
            .map_err(|_| {
                ConstructError::new(
                    ErrorKind::InvalidCount {
                        found: token.text.to_string(),
                    },
                    token.span,
                )
            })
    }

    /// Fails if anything but comments and whitespace is left.
    pub fn expect_end(&mut self) -> Result<(), ConstructError> {
        match self.next_word()? {
            None => Ok(()),
            Some(token) => Err(ConstructError::new(
                ErrorKind::TrailingInput {
                    found: token.text.to_string(),
                },
                token.span,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string_skips_comments() {
        let mut reader = TokenReader::new("// header\nwalk // trailing\n  stand", 100);
        assert_eq!(reader.read_string().unwrap().text, "walk");
        let token = reader.read_string().unwrap();
        assert_eq!(token.text, "stand");
        assert_eq!(token.span.str_of(reader.source()), "stand");
        assert!(reader.expect_end().is_ok());
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = TokenReader::new("x", 100);
        reader.read_string().unwrap();
        let err = reader.read_string().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
        assert_eq!(err.span, Span::new(1, 1));
    }

    #[test]
    fn test_token_too_long() {
        let mut reader = TokenReader::new("abcdef", 4);
        let err = reader.read_string().unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenTooLong { length: 6, max: 4 });
        assert_eq!(err.span, Span::new(0, 6));
    }

    #[test]
    fn test_read_value() {
        let mut reader = TokenReader::new("2.5 -3 1e3 abc inf", 100);
        assert_eq!(reader.read_value().unwrap().0, 2.5);
        assert_eq!(reader.read_value().unwrap().0, -3.0);
        assert_eq!(reader.read_value().unwrap().0, 1000.0);
        assert_eq!(
            reader.read_value().unwrap_err().kind,
            ErrorKind::InvalidValue { found: "abc".into() }
        );
        assert!(reader.read_value().is_err());
    }

    #[test]
    fn test_read_count() {
        let mut reader = TokenReader::new("3 -1 2.5", 100);
        assert_eq!(reader.read_count().unwrap().0, 3);
        assert_eq!(
            reader.read_count().unwrap_err().kind,
            ErrorKind::InvalidCount { found: "-1".into() }
        );
        assert!(reader.read_count().is_err());
    }

    #[test]
    fn test_trailing_input() {
        let mut reader = TokenReader::new("a b", 100);
        reader.read_string().unwrap();
        let err = reader.expect_end().unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput { found: "b".into() });
    }

    #[test]
    fn test_tag() {
        let mut reader = TokenReader::new("+ ab", 100);
        assert_eq!(reader.read_string().unwrap().tag(), Some('+'));
        assert_eq!(reader.read_string().unwrap().tag(), None);
    }
}
