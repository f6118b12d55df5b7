use crate::{
    ast::{Declaration, Expression, Slot, Statement},
    interpreter::parser::{
        core::{ParseResult, parse_expression},
        utils::TokenStream,
    },
};

/// Parses statements until the next token is one of `terminators`.
///
/// The terminator itself is left in the stream for the caller to consume.
///
/// # Errors
/// Returns a `ParseError` if a statement is malformed or the input ends
/// before a terminator is found.
pub fn parse_block(tokens: &mut TokenStream, terminators: &[&str]) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();
    loop {
        if terminators.iter().any(|t| tokens.peek_literal(t)) {
            return Ok(statements);
        }
        if tokens.peek().is_none() {
            let expected = terminators.iter()
                                      .map(|t| format!("'{t}'"))
                                      .collect::<Vec<_>>()
                                      .join(" or ");
            return Err(tokens.error(expected));
        }
        statements.push(parse_statement(tokens)?);
    }
}

/// Parses a single statement.
///
/// A statement starts with one of the keywords `LET`, `IF`, `FOR`, `WHILE` or
/// `RETURN`; anything else is an expression, which becomes an assignment when
/// followed by `=`.
///
/// Grammar:
/// ```text
///     statement := 'LET' declaration
///                | 'IF' if_statement
///                | 'FOR' for_statement
///                | 'WHILE' while_statement
///                | 'RETURN' expression ';'
///                | expression ('=' expression)? ';'
/// ```
///
/// # Errors
/// Returns a `ParseError` describing the first token that does not fit.
pub fn parse_statement(tokens: &mut TokenStream) -> ParseResult<Statement> {
    if tokens.match_literal("LET") {
        return parse_declaration(tokens);
    }
    if tokens.match_literal("IF") {
        return parse_if(tokens);
    }
    if tokens.match_literal("FOR") {
        return parse_for(tokens);
    }
    if tokens.match_literal("WHILE") {
        return parse_while(tokens);
    }
    if tokens.match_literal("RETURN") {
        let value = parse_expression(tokens)?;
        tokens.expect_literal(";")?;
        return Ok(Statement::Return { value });
    }

    let expression = parse_expression(tokens)?;
    if tokens.match_literal("=") {
        let value = parse_expression(tokens)?;
        tokens.expect_literal(";")?;
        return Ok(Statement::Assignment { receiver: expression,
                                          value });
    }
    tokens.expect_literal(";")?;
    Ok(Statement::Expression(expression))
}

/// Parses a local declaration after its `LET` keyword.
///
/// Grammar: `declaration := IDENTIFIER (':' IDENTIFIER)? ('=' expression)? ';'`
fn parse_declaration(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let (name, offset) = tokens.expect_identifier("variable name")?;
    let type_name = if tokens.match_literal(":") {
        Some(tokens.expect_identifier("type name")?.0)
    } else {
        None
    };
    let initializer = if tokens.match_literal("=") {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    tokens.expect_literal(";")?;

    Ok(Statement::Declaration(Declaration { name,
                                            type_name,
                                            initializer,
                                            offset,
                                            variable: Slot::new() }))
}

/// Parses an `IF` statement after its keyword.
///
/// Grammar: `if := expression 'DO' statement* ('ELSE' statement*)? 'END'`
fn parse_if(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let condition = parse_expression(tokens)?;
    tokens.expect_literal("DO")?;
    let then_body = parse_block(tokens, &["ELSE", "END"])?;
    let else_body = if tokens.match_literal("ELSE") {
        parse_block(tokens, &["END"])?
    } else {
        Vec::new()
    };
    tokens.expect_literal("END")?;

    Ok(Statement::If { condition,
                       then_body,
                       else_body })
}

/// Parses a `FOR` statement after its keyword.
///
/// The initializer and the increment are restricted to `name = expression`;
/// both are represented as assignments to a bare name.
///
/// Grammar:
/// ```text
///     for := '(' step? ';' expression ';' step? ')' statement* 'END'
///     step := IDENTIFIER '=' expression
/// ```
fn parse_for(tokens: &mut TokenStream) -> ParseResult<Statement> {
    tokens.expect_literal("(")?;
    let init = if tokens.peek_literal(";") {
        None
    } else {
        Some(Box::new(parse_for_step(tokens)?))
    };
    tokens.expect_literal(";")?;
    let condition = parse_expression(tokens)?;
    tokens.expect_literal(";")?;
    let increment = if tokens.peek_literal(")") {
        None
    } else {
        Some(Box::new(parse_for_step(tokens)?))
    };
    tokens.expect_literal(")")?;
    let body = parse_block(tokens, &["END"])?;
    tokens.expect_literal("END")?;

    Ok(Statement::For { init,
                        condition,
                        increment,
                        body })
}

fn parse_for_step(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let (name, offset) = tokens.expect_identifier("loop variable")?;
    tokens.expect_literal("=")?;
    let value = parse_expression(tokens)?;
    Ok(Statement::Assignment { receiver: Expression::access(None, name, offset),
                               value })
}

/// Parses a `WHILE` statement after its keyword.
///
/// Grammar: `while := expression 'DO' statement* 'END'`
fn parse_while(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let condition = parse_expression(tokens)?;
    tokens.expect_literal("DO")?;
    let body = parse_block(tokens, &["END"])?;
    tokens.expect_literal("END")?;

    Ok(Statement::While { condition, body })
}
