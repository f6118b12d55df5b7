use std::rc::Rc;

use crate::{
    ast::{Expression, Field, Method, Slot, Source},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical,
            statement::parse_block,
            utils::{TokenStream, parse_comma_separated},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program.
///
/// Fields come first, then methods. Parsing only succeeds if every token is
/// consumed.
///
/// Grammar: `source := field* method*`
///
/// # Errors
/// Returns the first `ParseError` encountered, including
/// [`ParseError::TrailingTokens`] when tokens remain after the last method.
///
/// # Example
/// ```
/// use lectern::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("LET x: Integer = 1; DEF main(): Integer DO RETURN x; END").unwrap();
/// let source = parse(&tokens).unwrap();
///
/// assert_eq!(source.fields.len(), 1);
/// assert_eq!(source.methods[0].name, "main");
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Source> {
    let mut tokens = TokenStream::new(tokens);
    let mut fields = Vec::new();
    let mut methods = Vec::new();

    while tokens.match_literal("LET") {
        fields.push(parse_field(&mut tokens)?);
    }
    while tokens.match_literal("DEF") {
        methods.push(Rc::new(parse_method(&mut tokens)?));
    }

    if let Some(token) = tokens.next() {
        return Err(ParseError::TrailingTokens { token:  token.literal.clone(),
                                                offset: token.offset, });
    }

    tracing::debug!(fields = fields.len(), methods = methods.len(), "parsed source");
    Ok(Source { fields, methods })
}

/// Parses a global field after its `LET` keyword.
///
/// Grammar: `field := 'LET' 'CONST'? IDENTIFIER ':' IDENTIFIER ('=' expression)? ';'`
fn parse_field(tokens: &mut TokenStream) -> ParseResult<Field> {
    let constant = tokens.match_literal("CONST");
    let (name, offset) = tokens.expect_identifier("field name")?;
    tokens.expect_literal(":")?;
    let (type_name, _) = tokens.expect_identifier("type name")?;

    let initializer = if tokens.match_literal("=") {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    tokens.expect_literal(";")?;

    Ok(Field { name,
               type_name: Some(type_name),
               constant,
               initializer,
               offset,
               variable: Slot::new() })
}

/// Parses a method after its `DEF` keyword.
///
/// Grammar:
/// ```text
///     method := 'DEF' IDENTIFIER '(' (parameter (',' parameter)*)? ')'
///               (':' IDENTIFIER)? 'DO' statement* 'END'
///     parameter := IDENTIFIER ':' IDENTIFIER
/// ```
fn parse_method(tokens: &mut TokenStream) -> ParseResult<Method> {
    let (name, offset) = tokens.expect_identifier("method name")?;
    tokens.expect_literal("(")?;
    let parameters = parse_comma_separated(tokens, parse_parameter, ")")?;

    let return_type = if tokens.match_literal(":") {
        Some(tokens.expect_identifier("return type")?.0)
    } else {
        None
    };

    tokens.expect_literal("DO")?;
    let body = parse_block(tokens, &["END"])?;
    tokens.expect_literal("END")?;

    let (parameters, parameter_types) = parameters.into_iter().unzip();
    Ok(Method { name,
                parameters,
                parameter_types,
                return_type,
                body,
                offset,
                function: Slot::new() })
}

fn parse_parameter(tokens: &mut TokenStream) -> ParseResult<(String, String)> {
    let (name, _) = tokens.expect_identifier("parameter name")?;
    tokens.expect_literal(":")?;
    let (type_name, _) = tokens.expect_identifier("parameter type")?;
    Ok((name, type_name))
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the loosest
/// tier, the logical operators, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := logical`
pub fn parse_expression(tokens: &mut TokenStream) -> ParseResult<Expression> {
    parse_logical(tokens)
}
