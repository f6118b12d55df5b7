use crate::{
    ast::{BinaryOperator, Expression},
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, primary::parse_secondary, utils::TokenStream},
    },
};

/// Maps the next token to one of the given operators without consuming it.
fn peek_operator(tokens: &mut TokenStream, tier: &[BinaryOperator]) -> Option<BinaryOperator> {
    let token = tokens.peek()?;
    if !matches!(token.kind, TokenKind::Identifier | TokenKind::Operator) {
        return None;
    }
    tier.iter()
        .copied()
        .find(|op| op.symbol() == token.literal)
}

/// Parses one left-associative tier: `operand (operator operand)*`.
fn parse_tier(tokens: &mut TokenStream,
              tier: &[BinaryOperator],
              operand: fn(&mut TokenStream) -> ParseResult<Expression>)
              -> ParseResult<Expression> {
    let mut left = operand(tokens)?;
    while let Some(op) = peek_operator(tokens, tier) {
        tokens.next();
        let right = operand(tokens)?;
        left = Expression::binary(op, left, right);
    }
    Ok(left)
}

/// Parses `OR` and `AND`, which share the loosest tier.
///
/// The rule is: `logical := equality (('OR' | 'AND') equality)*`
pub fn parse_logical(tokens: &mut TokenStream) -> ParseResult<Expression> {
    parse_tier(tokens, &[BinaryOperator::Or, BinaryOperator::And], parse_equality)
}

/// Parses the comparison operators.
///
/// The rule is: `equality := additive (('<' | '>' | '<=' | '>=' | '==' | '!=')
/// additive)*`
pub fn parse_equality(tokens: &mut TokenStream) -> ParseResult<Expression> {
    parse_tier(tokens,
               &[BinaryOperator::Less,
                 BinaryOperator::Greater,
                 BinaryOperator::LessEqual,
                 BinaryOperator::GreaterEqual,
                 BinaryOperator::Equal,
                 BinaryOperator::NotEqual],
               parse_additive)
}

/// Parses addition and subtraction.
///
/// The rule is: `additive := multiplicative (('+' | '-') multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream) -> ParseResult<Expression> {
    parse_tier(tokens,
               &[BinaryOperator::Add, BinaryOperator::Sub],
               parse_multiplicative)
}

/// Parses multiplication and division.
///
/// The rule is: `multiplicative := secondary (('*' | '/') secondary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream) -> ParseResult<Expression> {
    parse_tier(tokens,
               &[BinaryOperator::Mul, BinaryOperator::Div],
               parse_secondary)
}
