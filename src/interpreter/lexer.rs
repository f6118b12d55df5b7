use logos::Logos;

use crate::error::LexError;

/// The kind of a lexical token.
///
/// Keywords such as `LET` or `DO` are ordinary identifiers at this level; the
/// parser recognizes them by their literal text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexFault)]
#[logos(skip r"[ \t\r\n\x08]+")]
pub enum TokenKind {
    /// Names and keywords, such as `main`, `LET` or `snake-case_name`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*")]
    Identifier,
    /// Integer literals with an optional sign, such as `42` or `-7`.
    #[regex(r"[+-]?[0-9]+", check_integer)]
    Integer,
    /// Decimal literals with an optional sign, such as `3.14` or `-0.5`.
    #[regex(r"[+-]?[0-9]+\.[0-9]*", check_decimal)]
    Decimal,
    /// Character literals, such as `'a'` or `'\n'`.
    #[regex(r"'([^'\\\n\r]|\\[^\n\r])*'?", check_character)]
    Character,
    /// String literals, such as `"hello\n"`.
    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*"?"#, check_string)]
    String,
    /// Comparison operators and every other single character, such as `<=`,
    /// `.`, `(` or `;`.
    #[regex(r"[<>!=]=?")]
    #[regex(r#"[^A-Za-z0-9_'"<>!= \t\r\n\x08]"#)]
    Operator,
}

/// A token together with its raw source text and position.
///
/// The literal is kept exactly as written, so character and string tokens
/// still contain their quotes and undecoded escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The token text as it appears in the source.
    pub literal: String,
    /// Character offset of the first character of the token.
    pub offset:  usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, offset: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               offset }
    }

    /// Character offset just past the end of the token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.literal.chars().count()
    }
}

/// Failure reported by a token callback.
///
/// Positions are byte offsets into the source; [`tokenize`] converts them into
/// character offsets when building the public [`LexError`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexFault {
    /// Nothing matched at the current position.
    #[default]
    Unrecognized,
    /// A zero followed by another digit.
    LeadingZero(usize),
    /// A decimal point without digits after it.
    MissingFraction(usize),
    /// A malformed character literal.
    InvalidCharacter(usize),
    /// A string without its closing quote.
    UnterminatedString(usize),
    /// An unknown escape code.
    InvalidEscape(usize),
}

impl LexFault {
    fn into_error(self, cursor: &mut CharCursor, source: &str, token_start: usize) -> LexError {
        match self {
            Self::Unrecognized => {
                LexError::UnexpectedCharacter { offset: cursor.advance_to(source, token_start) }
            },
            Self::LeadingZero(at) => LexError::LeadingZero { offset: cursor.advance_to(source, at) },
            Self::MissingFraction(at) => {
                LexError::MissingFraction { offset: cursor.advance_to(source, at) }
            },
            Self::InvalidCharacter(at) => {
                LexError::InvalidCharacter { offset: cursor.advance_to(source, at) }
            },
            Self::UnterminatedString(at) => {
                LexError::UnterminatedString { offset: cursor.advance_to(source, at) }
            },
            Self::InvalidEscape(at) => {
                LexError::InvalidEscape { offset: cursor.advance_to(source, at) }
            },
        }
    }
}

/// The characters that may follow a backslash.
const ESCAPE_CODES: &[char] = &['b', 'n', 'r', 't', '\'', '"', '\\'];

/// Rejects integers with a leading zero, such as `05`.
fn check_integer(lex: &logos::Lexer<TokenKind>) -> Result<(), LexFault> {
    check_leading_zero(lex.slice(), lex.span().start)
}

/// Rejects decimals with a leading zero or without fractional digits.
fn check_decimal(lex: &logos::Lexer<TokenKind>) -> Result<(), LexFault> {
    let slice = lex.slice();
    let start = lex.span().start;
    let point = slice.find('.').unwrap_or(slice.len());
    check_leading_zero(&slice[..point], start)?;
    if point + 1 == slice.len() {
        return Err(LexFault::MissingFraction(lex.span().end));
    }
    Ok(())
}

fn check_leading_zero(number: &str, start: usize) -> Result<(), LexFault> {
    let sign = usize::from(number.starts_with(['+', '-']));
    let digits = &number[sign..];
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(LexFault::LeadingZero(start + sign + 1));
    }
    Ok(())
}

/// Requires exactly one character or escape between the quotes.
fn check_character(lex: &logos::Lexer<TokenKind>) -> Result<(), LexFault> {
    let slice = lex.slice();
    let start = lex.span().start;
    let (units, closed, end) = scan_quoted(slice, '\'', start)?;
    if closed && units == 1 {
        return Ok(());
    }
    if !closed && lex.remainder().starts_with('\\') {
        return Err(LexFault::InvalidEscape(end + 1));
    }
    // The closing quote must follow the first character or escape.
    let expected_quote = if units == 0 { start + 1 } else { start + 1 + first_unit_len(&slice[1..]) };
    Err(LexFault::InvalidCharacter(expected_quote))
}

/// Requires a closing quote and valid escapes.
fn check_string(lex: &logos::Lexer<TokenKind>) -> Result<(), LexFault> {
    let (_, closed, end) = scan_quoted(lex.slice(), '"', lex.span().start)?;
    if closed {
        Ok(())
    } else if lex.remainder().starts_with('\\') {
        Err(LexFault::InvalidEscape(end + 1))
    } else {
        Err(LexFault::UnterminatedString(end))
    }
}

/// Walks the body of a quoted literal, validating escapes.
///
/// Returns the number of characters the body decodes to, whether the closing
/// quote was found, and the byte offset just past the slice.
fn scan_quoted(slice: &str, quote: char, start: usize) -> Result<(usize, bool, usize), LexFault> {
    let end = start + slice.len();
    let mut units = 0;
    let mut chars = slice.char_indices().skip(1);
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                let (code_index, code) = chars.next().ok_or(LexFault::InvalidEscape(end))?;
                if !ESCAPE_CODES.contains(&code) {
                    return Err(LexFault::InvalidEscape(start + code_index));
                }
                units += 1;
            },
            c if c == quote && index + c.len_utf8() == slice.len() => return Ok((units, true, end)),
            _ => units += 1,
        }
    }
    Ok((units, false, end))
}

/// Byte length of the first character or escape of a literal body.
fn first_unit_len(body: &str) -> usize {
    let mut chars = body.chars();
    match chars.next() {
        Some('\\') => 1 + chars.next().map_or(0, char::len_utf8),
        Some(c) => c.len_utf8(),
        None => 0,
    }
}

/// Turns source text into tokens.
///
/// Whitespace (space, tab, newline, carriage return and backspace) separates
/// tokens and is discarded. Lexing stops at the first character that can
/// neither extend nor start a token.
///
/// # Errors
/// Returns a [`LexError`] carrying the character offset of the offending
/// character.
///
/// # Example
/// ```
/// use lectern::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("LET x: Integer = -5;").unwrap();
/// let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
///
/// assert_eq!(kinds,
///            [TokenKind::Identifier,
///             TokenKind::Identifier,
///             TokenKind::Operator,
///             TokenKind::Identifier,
///             TokenKind::Operator,
///             TokenKind::Integer,
///             TokenKind::Operator]);
/// assert_eq!(tokens[5].literal, "-5");
///
/// assert_eq!(tokenize("05").unwrap_err().offset(), 1);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut cursor = CharCursor::default();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => {
                let offset = cursor.advance_to(source, span.start);
                tokens.push(Token::new(kind, lexer.slice(), offset));
            },
            Err(fault) => {
                let error = fault.into_error(&mut cursor, source, span.start);
                tracing::debug!(%error, "lexing failed");
                return Err(error);
            },
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Converts increasing byte offsets into character offsets without rescanning
/// the source from the start every time.
#[derive(Default)]
struct CharCursor {
    byte: usize,
    char: usize,
}

impl CharCursor {
    fn advance_to(&mut self, source: &str, byte: usize) -> usize {
        let byte = byte.min(source.len());
        if byte >= self.byte {
            self.char += source[self.byte..byte].chars().count();
        } else {
            self.char -= source[byte..self.byte].chars().count();
        }
        self.byte = byte;
        self.char
    }
}
