use std::{iter::Peekable, slice};

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// A cursor over the token sequence with one token of lookahead.
///
/// Remembers where the input ends so that errors raised after the last token
/// can still point at a position.
pub struct TokenStream<'a> {
    tokens: Peekable<slice::Iter<'a, Token>>,
    end:    usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream positioned at the first token.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens: tokens.iter().peekable(),
               end:    tokens.last().map_or(0, Token::end), }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Option<&'a Token> {
        self.tokens.peek().copied()
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Option<&'a Token> {
        self.tokens.next()
    }

    /// Returns `true` if the next token's text is `literal`.
    pub fn peek_literal(&mut self, literal: &str) -> bool {
        self.peek().is_some_and(|token| token.literal == literal)
    }

    /// Returns `true` if the next token is of the given kind.
    pub fn peek_kind(&mut self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    /// Consumes the next token if its text is `literal`.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.peek_literal(literal) {
            self.tokens.next();
            return true;
        }
        false
    }

    /// Consumes the next token, which must have the text `literal`.
    ///
    /// # Errors
    /// Returns a `ParseError` pointing at the next token (or the end of
    /// input) otherwise.
    pub fn expect_literal(&mut self, literal: &str) -> ParseResult<&'a Token> {
        match self.peek() {
            Some(token) if token.literal == literal => {
                self.tokens.next();
                Ok(token)
            },
            _ => Err(self.error(format!("'{literal}'"))),
        }
    }

    /// Consumes the next token, which must be an identifier, and returns its
    /// text and offset.
    ///
    /// # Errors
    /// Returns a `ParseError` naming `what` otherwise.
    pub fn expect_identifier(&mut self, what: &str) -> ParseResult<(String, usize)> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.tokens.next();
                Ok((token.literal.clone(), token.offset))
            },
            _ => Err(self.error(what)),
        }
    }

    /// Builds an error for the current position.
    pub fn error(&mut self, expected: impl Into<String>) -> ParseError {
        let expected = expected.into();
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken { expected,
                                                         found: token.literal.clone(),
                                                         offset: token.offset },
            None => ParseError::UnexpectedEndOfInput { expected,
                                                       offset: self.end },
        }
    }

    /// Returns the offset of the next token, or the end of input.
    pub fn offset(&mut self) -> usize {
        let end = self.end;
        self.peek().map_or(end, |token| token.offset)
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by argument lists and parameter lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, T>(
    tokens: &mut TokenStream<'a>,
    parse_item: impl Fn(&mut TokenStream<'a>) -> ParseResult<T>,
    closing: &str)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.match_literal(closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if tokens.match_literal(",") {
            continue;
        }
        if tokens.match_literal(closing) {
            break;
        }
        return Err(tokens.error(format!("',' or '{closing}'")));
    }
    Ok(items)
}
