use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::{ExprKind, Expression, Literal},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{TokenStream, parse_comma_separated},
        },
    },
};

/// Parses a primary expression followed by any number of member accesses and
/// method calls.
///
/// Grammar: `secondary := primary ('.' IDENTIFIER ('(' arguments ')')?)*`
///
/// # Errors
/// Returns a `ParseError` if a `.` is not followed by an identifier.
pub fn parse_secondary(tokens: &mut TokenStream) -> ParseResult<Expression> {
    let mut expression = parse_primary(tokens)?;
    while tokens.match_literal(".") {
        let (name, _) = tokens.expect_identifier("member name")?;
        let offset = expression.offset;
        expression = if tokens.match_literal("(") {
            let arguments = parse_comma_separated(tokens, parse_expression, ")")?;
            Expression::function(Some(expression), name, arguments, offset)
        } else {
            Expression::access(Some(expression), name, offset)
        };
    }
    Ok(expression)
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := 'TRUE' | 'FALSE' | 'NIL'
///              | INTEGER | DECIMAL | CHARACTER | STRING
///              | '(' expression ')'
///              | IDENTIFIER ('(' arguments ')')?
/// ```
///
/// Parentheses may only wrap a binary expression; `(5)` is rejected.
///
/// # Errors
/// Returns a `ParseError` if no primary expression starts at the next token.
pub fn parse_primary(tokens: &mut TokenStream) -> ParseResult<Expression> {
    let Some(token) = tokens.peek() else {
        return Err(tokens.error("an expression"));
    };

    match token.kind {
        TokenKind::Identifier => {
            tokens.next();
            match token.literal.as_str() {
                "TRUE" => Ok(Expression::literal(Literal::Boolean(true), token.offset)),
                "FALSE" => Ok(Expression::literal(Literal::Boolean(false), token.offset)),
                "NIL" => Ok(Expression::literal(Literal::Nil, token.offset)),
                name if tokens.match_literal("(") => {
                    let arguments = parse_comma_separated(tokens, parse_expression, ")")?;
                    Ok(Expression::function(None, name, arguments, token.offset))
                },
                name => Ok(Expression::access(None, name, token.offset)),
            }
        },
        TokenKind::Integer | TokenKind::Decimal | TokenKind::Character | TokenKind::String => {
            tokens.next();
            Ok(Expression::literal(parse_literal(token)?, token.offset))
        },
        TokenKind::Operator if token.literal == "(" => {
            tokens.next();
            let inner = parse_expression(tokens)?;
            tokens.expect_literal(")")?;
            if !matches!(inner.kind, ExprKind::Binary { .. }) {
                return Err(ParseError::InvalidGroup { offset: inner.offset });
            }
            Ok(Expression::new(ExprKind::Group(Box::new(inner)), token.offset))
        },
        TokenKind::Operator => Err(tokens.error("an expression")),
    }
}

/// Converts a literal token into its value.
fn parse_literal(token: &Token) -> ParseResult<Literal> {
    let invalid = || ParseError::UnexpectedToken { expected: "a literal".to_string(),
                                                   found:    token.literal.clone(),
                                                   offset:   token.offset, };
    let text = token.literal.as_str();

    match token.kind {
        TokenKind::Integer => {
            BigInt::from_str(text.trim_start_matches('+')).map(Literal::Integer)
                                                          .map_err(|_| invalid())
        },
        TokenKind::Decimal => {
            BigDecimal::from_str(text.trim_start_matches('+')).map(Literal::Decimal)
                                                              .map_err(|_| invalid())
        },
        TokenKind::Character => {
            let decoded = decode_escapes(unquote(text));
            let mut chars = decoded.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Literal::Character(c)),
                _ => Err(invalid()),
            }
        },
        TokenKind::String => Ok(Literal::String(decode_escapes(unquote(text)))),
        TokenKind::Identifier | TokenKind::Operator => Err(invalid()),
    }
}

/// Strips the surrounding quotes of a character or string token.
fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Decodes escape sequences left to right.
///
/// `\n`, `\r`, `\t` and `\f` become the corresponding control characters;
/// any other escaped character, including `\\`, `\"` and `\'`, stands for
/// itself.
///
/// # Example
/// ```
/// use lectern::interpreter::parser::primary::decode_escapes;
///
/// assert_eq!(decode_escapes(r"a\tb\\n"), "a\tb\\n");
/// assert_eq!(decode_escapes(r#"say \"hi\""#), "say \"hi\"");
/// ```
#[must_use]
pub fn decode_escapes(body: &str) -> String {
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some('f') => decoded.push('\u{c}'),
            Some(other) => decoded.push(other),
            None => decoded.push('\\'),
        }
    }
    decoded
}
