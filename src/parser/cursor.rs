//! Positional view over the token sequence
//!
//! The cursor borrows the tokens and owns only an offset. It never rewinds:
//! every consumed token moves the position forward by exactly one, and the
//! position stops at the end of the slice.

use crate::parser::parse::{Expectation, ParseError, ParseFailure};
use crate::parser::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenCursor {
            tokens,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    /// Token at the cursor, or `OutOfTokens`
    pub fn current(&self) -> Result<&'a Token, ParseError> {
        self.tokens
            .get(self.position)
            .ok_or_else(|| self.error(ParseFailure::OutOfTokens))
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.position += 1;
        }
    }

    /// Does the current token have this kind and value?
    ///
    /// An exhausted cursor is an error, not a mismatch.
    pub fn check(&self, kind: TokenKind, value: &str) -> Result<bool, ParseError> {
        Ok(self.current()?.is(kind, value))
    }

    pub fn check_kind(&self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.current()?.kind == kind)
    }

    /// Consume the current token if it is exactly `kind value`
    pub fn expect(&mut self, kind: TokenKind, value: &str) -> Result<&'a Token, ParseError> {
        let token = self.current()?;
        if token.is(kind, value) {
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(
                Expectation::Token {
                    kind,
                    value: value.to_string(),
                },
                token,
            ))
        }
    }

    /// Consume the current token if it has this kind, whatever its value
    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        let token = self.current()?;
        if token.kind == kind {
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(Expectation::Kind(kind), token))
        }
    }

    pub(crate) fn error(&self, reason: ParseFailure) -> ParseError {
        ParseError {
            reason,
            position: self.position,
        }
    }

    pub(crate) fn unexpected(&self, expected: Expectation, found: &Token) -> ParseError {
        self.error(ParseFailure::UnexpectedToken {
            expected,
            found: found.clone(),
        })
    }
}
