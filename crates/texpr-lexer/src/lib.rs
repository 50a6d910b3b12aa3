// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the texpr template expression language.
//!
//! This crate tokenizes expression source text using logos.
//!
//! # Design
//!
//! - `Token` — all texpr token types (keywords, operators, literals,
//!   identifiers, dotted access tokens)
//! - `LexError` — structured lexical errors carrying a kind and the byte
//!   offset of the offending input
//! - Literal values are constructed at lex time: integers and floats are
//!   parsed, string escapes are resolved
//! - Token strings defined once in `TOKEN_STRINGS` table (single source of
//!   truth for Display)
//!
//! # Examples
//!
//! ```
//! # use texpr_lexer::{lex, Token};
//! let tokens = lex("$user.name == 'admin'").unwrap();
//! assert_eq!(tokens.len(), 4);
//! assert!(matches!(tokens[0].0, Token::DollarIdent(_)));
//! ```

use logos::Logos;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Lexical error with source offset.
///
/// A lexical error aborts tokenization at `offset`; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Category of this error
    pub kind: LexErrorKind,
    /// Byte offset of the offending character or sequence
    pub offset: usize,
    /// Human-readable error message
    pub message: String,
}

/// Category of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// String literal missing its closing quote, or containing a raw
    /// newline.
    UnterminatedString,
    /// Unknown escape sequence, or malformed `\uXXXX`.
    BadEscape,
    /// Numeric literal that cannot be represented, or a hex literal with
    /// lowercase digits.
    BadNumber,
    /// Character that cannot start any token.
    UnexpectedChar,
}

impl LexError {
    /// Create an "unterminated string" error at the opening quote.
    pub fn unterminated_string(offset: usize) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedString,
            offset,
            message: "unterminated string literal".to_string(),
        }
    }

    /// Create a "bad escape" error at the backslash.
    pub fn bad_escape(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: LexErrorKind::BadEscape,
            offset,
            message: message.into(),
        }
    }

    /// Create a "bad number" error at the start of the literal.
    pub fn bad_number(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: LexErrorKind::BadNumber,
            offset,
            message: message.into(),
        }
    }

    /// Create an "unexpected character" error.
    pub fn unexpected_char(offset: usize, found: &str) -> Self {
        Self {
            kind: LexErrorKind::UnexpectedChar,
            offset,
            message: format!("unexpected character '{}'", found),
        }
    }
}

// Default is the sentinel logos produces for unmatched input; the `lex`
// driver rewrites it with the real offset before it escapes this crate.
impl Default for LexError {
    fn default() -> Self {
        Self {
            kind: LexErrorKind::UnexpectedChar,
            offset: 0,
            message: String::new(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for LexError {}

/// texpr token.
///
/// Represents all lexical elements of the expression language: keyword
/// literals, operators, punctuation, and data-carrying literal tokens.
///
/// Token strings for keywords, operators, and punctuation are defined once
/// in the `TOKEN_STRINGS` table and indexed by discriminant for Display.
///
/// # Layout
///
/// Uses `#[repr(u16)]` to guarantee discriminant values are stable and
/// can be safely used to index into `TOKEN_STRINGS`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[repr(u16)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
pub enum Token {
    // === Keyword literals ===
    /// Literal `null`
    #[token("null")]
    Null,
    /// Boolean literal `true`
    #[token("true")]
    True,
    /// Boolean literal `false`
    #[token("false")]
    False,

    // === Word operators ===
    /// Keyword `not` (logical not)
    #[token("not")]
    Not,
    /// Keyword `and` (logical and)
    #[token("and")]
    And,
    /// Keyword `or` (logical or)
    #[token("or")]
    Or,

    // === Operators ===
    /// Operator `-` (unary or binary; the parser disambiguates)
    #[token("-")]
    Minus,
    /// Operator `+`
    #[token("+")]
    Plus,
    /// Operator `*`
    #[token("*")]
    Star,
    /// Operator `/`
    #[token("/")]
    Slash,
    /// Operator `%`
    #[token("%")]
    Percent,
    /// Operator `<`
    #[token("<")]
    Lt,
    /// Operator `>`
    #[token(">")]
    Gt,
    /// Operator `<=`
    #[token("<=")]
    LtEq,
    /// Operator `>=`
    #[token(">=")]
    GtEq,
    /// Operator `==`
    #[token("==")]
    EqEq,
    /// Operator `!=`
    #[token("!=")]
    BangEq,

    // === Punctuation ===
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Delimiter `[`
    #[token("[")]
    LBracket,
    /// Delimiter `]`
    #[token("]")]
    RBracket,
    /// Delimiter `,`
    #[token(",")]
    Comma,
    /// Delimiter `:`
    #[token(":")]
    Colon,
    /// Operator `?` (ternary condition)
    #[token("?")]
    Question,
    /// Injected-data prefix `$ij.` (single token; no whitespace inside)
    #[token("$ij.")]
    DollarIjDot,

    // === Literals ===
    /// Integer literal, decimal (`123`) or hexadecimal (`0x1A2B`).
    ///
    /// Decimal and hex both normalize to a signed 64-bit value; a literal
    /// out of range is a `BadNumber` error rather than a wrap. Hex digits
    /// must be uppercase (`0x1a` is an error, matching the grammar).
    #[regex(r"[0-9]+", parse_decimal)]
    #[regex(r"0x[0-9a-fA-F]+", parse_hex)]
    Integer(i64),

    /// Float literal (e.g., 3.14, 1.5e-8, 2e10).
    ///
    /// Lowercase `e` exponent only; digits required on both sides of any
    /// `.`.
    #[regex(r"[0-9]+\.[0-9]+(e[+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+e[+-]?[0-9]+", parse_float)]
    Float(f64),

    /// Single-quoted string literal with escapes resolved.
    ///
    /// The second pattern catches literals that reach a newline or EOF
    /// without a closing quote and reports `UnterminatedString`.
    ///
    /// Uses `Rc<str>` for cheap cloning throughout the parser pipeline.
    #[regex(r"'([^'\\\n\r]|\\[^\n\r])*'", unescape_string)]
    #[regex(r"'([^'\\\n\r]|\\[^\n\r])*\\?", unterminated_string)]
    Str(Rc<str>),

    /// Identifier (e.g., round, isFirst, max_items).
    ///
    /// Uses `Rc<str>` for cheap cloning throughout the parser pipeline.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),

    /// `$` immediately followed by an identifier; the `$` is stripped.
    ///
    /// No whitespace is permitted between the `$` and the identifier
    /// (a lone `$` is an `UnexpectedChar` error).
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*", |lex| Rc::from(&lex.slice()[1..]))]
    DollarIdent(Rc<str>),

    /// `.`, optional whitespace, identifier. The dot and whitespace are
    /// stripped from the stored image.
    #[regex(r"\.[ \t\r\n]*[A-Za-z_][A-Za-z0-9_]*", |lex| {
        Rc::from(lex.slice()[1..].trim_start_matches([' ', '\t', '\r', '\n']))
    })]
    DotIdent(Rc<str>),

    /// `.`, optional whitespace, decimal index. The dot and whitespace are
    /// stripped from the stored image.
    #[regex(r"\.[ \t\r\n]*[0-9]+", parse_dot_index)]
    DotIndex(u32),
}

/// Parse a decimal integer literal.
fn parse_decimal(lex: &mut logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse::<i64>().map_err(|_| {
        LexError::bad_number(lex.span().start, "integer literal out of range")
    })
}

/// Parse a hexadecimal integer literal (`0x` followed by uppercase digits).
fn parse_hex(lex: &mut logos::Lexer<Token>) -> Result<i64, LexError> {
    let digits = &lex.slice()[2..];
    if digits.bytes().any(|b| b.is_ascii_lowercase()) {
        return Err(LexError::bad_number(
            lex.span().start,
            "hex literal digits must be uppercase",
        ));
    }
    i64::from_str_radix(digits, 16).map_err(|_| {
        LexError::bad_number(lex.span().start, "hex literal out of range")
    })
}

/// Parse a float literal from its source spelling.
fn parse_float(lex: &mut logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice().parse::<f64>().map_err(|_| {
        LexError::bad_number(lex.span().start, "malformed float literal")
    })
}

/// Report an unterminated string literal.
fn unterminated_string(lex: &mut logos::Lexer<Token>) -> Result<Rc<str>, LexError> {
    Err(LexError::unterminated_string(lex.span().start))
}

/// Parse the index of a `DOT_INDEX` token.
fn parse_dot_index(lex: &mut logos::Lexer<Token>) -> Result<u32, LexError> {
    let digits = lex.slice()[1..].trim_start_matches([' ', '\t', '\r', '\n']);
    digits.parse::<u32>().map_err(|_| {
        LexError::bad_number(lex.span().start, "index literal out of range")
    })
}

/// Resolve the escapes of a terminated string literal.
///
/// Supported escapes: `\\ \' \" \n \r \t \b \f` and `\uXXXX` (exactly four
/// hex digits, either case). Anything else is a `BadEscape` error at the
/// backslash.
fn unescape_string(lex: &mut logos::Lexer<Token>) -> Result<Rc<str>, LexError> {
    let slice = lex.slice();
    let content = &slice[1..slice.len() - 1];
    let base = lex.span().start + 1;

    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '\\')) => out.push('\\'),
            Some((_, '\'')) => out.push('\''),
            Some((_, '"')) => out.push('"'),
            Some((_, 'n')) => out.push('\n'),
            Some((_, 'r')) => out.push('\r'),
            Some((_, 't')) => out.push('\t'),
            Some((_, 'b')) => out.push('\u{0008}'),
            Some((_, 'f')) => out.push('\u{000C}'),
            Some((_, 'u')) => out.push(unescape_unicode(i, base, &mut chars)?),
            Some((_, other)) => {
                return Err(LexError::bad_escape(
                    base + i,
                    format!("unsupported escape sequence '\\{}'", other),
                ));
            }
            // The token regex never ends a terminated literal on a bare
            // backslash, so this arm is unreachable in practice.
            None => return Err(LexError::bad_escape(base + i, "trailing backslash")),
        }
    }

    Ok(Rc::from(out.as_str()))
}

/// Decode the `XXXX` of a `\uXXXX` escape starting at `escape_pos`.
fn unescape_unicode(
    escape_pos: usize,
    base: usize,
    chars: &mut std::str::CharIndices,
) -> Result<char, LexError> {
    let mut value: u32 = 0;
    for _ in 0..4 {
        let digit = match chars.next() {
            Some((_, c)) if c.is_ascii_hexdigit() => c.to_digit(16).unwrap_or(0),
            _ => {
                return Err(LexError::bad_escape(
                    base + escape_pos,
                    "\\u escape requires exactly four hex digits",
                ));
            }
        };
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| {
        LexError::bad_escape(
            base + escape_pos,
            format!("\\u{:04X} is not a Unicode scalar value", value),
        )
    })
}

/// Tokenize expression source text.
///
/// Returns every token paired with its byte span, or the first lexical
/// error encountered. Whitespace between tokens is skipped and never
/// appears in the output.
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(err) => {
                // Unmatched input surfaces as the Default sentinel with no
                // position; rebuild it from the lexer's span. Callback
                // errors already carry their offset and message.
                return Err(if err.message.is_empty() {
                    LexError::unexpected_char(lexer.span().start, lexer.slice())
                } else {
                    err
                });
            }
        }
    }
    Ok(tokens)
}

/// Token string lookup table.
///
/// Maps discriminant indices to their string representation. This is the
/// single source of truth for token display strings, indexed by the enum
/// discriminant order.
///
/// NOTE: The `#[token("...")]` attributes above must match these strings.
/// This duplication is unavoidable due to logos requiring literal strings,
/// but this table at least consolidates Display logic to avoid a large match.
const TOKEN_STRINGS: &[&str] = &[
    "null", "true", "false", // keyword literals
    "not", "and", "or", // word operators
    "-", "+", "*", "/", "%", "<", ">", "<=", ">=", "==", "!=", // operators
    "(", ")", "[", "]", ",", ":", "?", "$ij.", // punctuation
];

impl Token {
    /// Get the index into TOKEN_STRINGS for simple tokens.
    ///
    /// # Returns
    ///
    /// Index for simple tokens (keywords, operators, punctuation); out of
    /// table range for data tokens, which Display handles by match.
    ///
    /// # Safety
    ///
    /// Safe due to `#[repr(u16)]` on Token enum ensuring stable discriminants.
    fn token_string_index(&self) -> usize {
        // Safe: Token has #[repr(u16)] so discriminant values are stable
        let discriminant = unsafe { *(self as *const Token as *const u16) };
        discriminant as usize
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals with data (not in TOKEN_STRINGS table)
            Token::Integer(n) => write!(f, "{}", n),
            Token::Float(x) => write!(f, "{}", x),
            Token::Str(s) => write!(f, "'{}'", s),
            Token::Ident(id) => write!(f, "{}", id),
            Token::DollarIdent(id) => write!(f, "${}", id),
            Token::DotIdent(id) => write!(f, ".{}", id),
            Token::DotIndex(n) => write!(f, ".{}", n),

            // Simple tokens (keywords, operators, punctuation)
            // Index into TOKEN_STRINGS using discriminant
            _ => {
                let idx = self.token_string_index();
                let s = TOKEN_STRINGS
                    .get(idx)
                    .expect("BUG: token discriminant out of bounds for TOKEN_STRINGS");
                write!(f, "{}", s)
            }
        }
    }
}
