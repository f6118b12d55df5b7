use lectern::{
    error::LexError,
    interpreter::lexer::{Token, TokenKind, tokenize},
};
use pretty_assertions::assert_eq;

fn kinds_and_literals(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens.iter()
          .map(|token| (token.kind, token.literal.as_str()))
          .collect()
}

#[test]
fn declaration_tokens() {
    let tokens = tokenize(r#"LET s: String = "a\"b";"#).unwrap();

    assert_eq!(kinds_and_literals(&tokens),
               [(TokenKind::Identifier, "LET"),
                (TokenKind::Identifier, "s"),
                (TokenKind::Operator, ":"),
                (TokenKind::Identifier, "String"),
                (TokenKind::Operator, "="),
                (TokenKind::String, r#""a\"b""#),
                (TokenKind::Operator, ";")]);
}

#[test]
fn comparison_operators_take_two_characters() {
    let tokens = tokenize("a<=b >= c != d == e < f!g").unwrap();
    let operators = tokens.iter()
                          .filter(|token| token.kind == TokenKind::Operator)
                          .map(|token| token.literal.as_str())
                          .collect::<Vec<_>>();

    assert_eq!(operators, ["<=", ">=", "!=", "==", "<", "!"]);
}

#[test]
fn identifiers_may_contain_dashes() {
    let tokens = tokenize("snake-case_name x - 1").unwrap();

    assert_eq!(kinds_and_literals(&tokens),
               [(TokenKind::Identifier, "snake-case_name"),
                (TokenKind::Identifier, "x"),
                (TokenKind::Operator, "-"),
                (TokenKind::Integer, "1")]);
}

#[test]
fn numbers() {
    let tokens = tokenize("0 -7 +12 3.14 -0.5 1.0").unwrap();

    assert_eq!(kinds_and_literals(&tokens),
               [(TokenKind::Integer, "0"),
                (TokenKind::Integer, "-7"),
                (TokenKind::Integer, "+12"),
                (TokenKind::Decimal, "3.14"),
                (TokenKind::Decimal, "-0.5"),
                (TokenKind::Decimal, "1.0")]);
}

#[test]
fn characters_keep_their_escapes() {
    let tokens = tokenize(r"'a' '\n' '\''").unwrap();

    assert_eq!(kinds_and_literals(&tokens),
               [(TokenKind::Character, "'a'"),
                (TokenKind::Character, r"'\n'"),
                (TokenKind::Character, r"'\''")]);
}

#[test]
fn offsets_count_characters() {
    let tokens = tokenize("a\n\t b \"é\" c").unwrap();
    let offsets = tokens.iter().map(|token| token.offset).collect::<Vec<_>>();

    assert_eq!(offsets, [0, 4, 6, 10]);
}

#[test]
fn malformed_numbers() {
    assert_eq!(tokenize("x = 05;").unwrap_err(),
               LexError::LeadingZero { offset: 5 });
    assert_eq!(tokenize("-00.5").unwrap_err(),
               LexError::LeadingZero { offset: 2 });
    assert_eq!(tokenize("1.").unwrap_err(),
               LexError::MissingFraction { offset: 2 });
}

#[test]
fn malformed_characters() {
    assert_eq!(tokenize("'ab'").unwrap_err(),
               LexError::InvalidCharacter { offset: 2 });
    assert_eq!(tokenize("''").unwrap_err(),
               LexError::InvalidCharacter { offset: 1 });
    assert_eq!(tokenize(r"'\q'").unwrap_err(),
               LexError::InvalidEscape { offset: 2 });
}

#[test]
fn malformed_strings() {
    assert_eq!(tokenize("\"abc").unwrap_err(),
               LexError::UnterminatedString { offset: 4 });
    assert_eq!(tokenize("\"abc\nd\"").unwrap_err(),
               LexError::UnterminatedString { offset: 4 });
    assert_eq!(tokenize(r#""a\qb""#).unwrap_err(),
               LexError::InvalidEscape { offset: 3 });
}

#[test]
fn relexing_joined_tokens_is_stable() {
    let source = r#"
        LET CONST limit: Integer = -10;
        DEF main(): Integer DO
            LET s = "tab\there" + 'c' + 2.50;
            IF limit <= 3 AND s != "x" DO print(s); END
            RETURN 0;
        END
    "#;
    let tokens = tokenize(source).unwrap();
    // Joined with spaces: adjacent identifiers and keywords would otherwise
    // merge into one token (`LET` + `CONST` lexes as `LETCONST`).
    let joined = tokens.iter()
                       .map(|token| token.literal.as_str())
                       .collect::<Vec<_>>()
                       .join(" ");
    let relexed = tokenize(&joined).unwrap();

    assert_eq!(kinds_and_literals(&relexed), kinds_and_literals(&tokens));
}
