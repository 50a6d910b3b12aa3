//! Parse error types and diagnostics rendering.

use std::fmt;
use texpr_ast::Span;
use texpr_lexer::{LexError, Token};

/// Parse error with source location and context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Source location where the error occurred
    pub span: Span,
    /// Human-readable error message
    pub message: String,
}

/// Category of parse error.
///
/// Each variant represents a specific class of parsing failure to enable
/// targeted handling and clear diagnostic messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was required (e.g. `]`, `:`) and something else
    /// was found.
    ExpectedToken,

    /// A token appeared where no grammar rule allows it.
    UnexpectedToken,

    /// Input ended while a construct was incomplete.
    UnexpectedEof,

    /// The reserved identifier `ij` was used as a variable or as a
    /// non-injected base key.
    ReservedName,

    /// An unquoted single identifier appeared as a map-literal key.
    DisallowedMapKey,

    /// The entry point's nonterminal was parsed but significant tokens
    /// remained.
    TrailingInput,
}

impl ParseError {
    /// Create an "expected token" error.
    pub fn expected_token(expected: Token, found: Option<Token>, span: Span) -> Self {
        let message = match &found {
            Some(token) => format!("expected '{}', found '{}'", expected, token),
            None => format!("expected '{}', found end of input", expected),
        };
        Self {
            kind: if found.is_none() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::ExpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(found: Option<&Token>, context: &str, span: Span) -> Self {
        let message = match found {
            Some(token) => format!("unexpected '{}' {}", token, context),
            None => format!("unexpected end of input {}", context),
        };
        Self {
            kind: if found.is_none() {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create the reserved-identifier error for `$ij` used as a variable
    /// or base key.
    pub fn reserved_ij(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::ReservedName,
            span,
            message: "Invalid param name 'ij'".to_string(),
        }
    }

    /// Create the disallowed map-key error for an unquoted single
    /// identifier used as a key.
    pub fn disallowed_map_key(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::DisallowedMapKey,
            span,
            message: "Disallowed single-identifier key; use single quotes for a string key \
                      or parentheses for a global key"
                .to_string(),
        }
    }

    /// Create a "trailing input" error for tokens left after the entry
    /// point's form.
    pub fn trailing_input(found: &Token, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::TrailingInput,
            span,
            message: format!("unexpected trailing input '{}'", found),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.span.start)
    }
}

impl std::error::Error for ParseError {}

/// Any error an entry point can surface: lexical or grammatical.
///
/// Propagation is bubbling; the first error at any depth aborts the entry
/// point. There is no recovery or partial AST.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The lexer rejected the input.
    Lex(LexError),
    /// The token stream did not derive the entry point's nonterminal.
    Parse(ParseError),
}

impl SyntaxError {
    /// Byte offset of the offending input.
    pub fn offset(&self) -> usize {
        match self {
            Self::Lex(e) => e.offset,
            Self::Parse(e) => e.span.start as usize,
        }
    }

    /// The error message without location information.
    pub fn message(&self) -> &str {
        match self {
            Self::Lex(e) => &e.message,
            Self::Parse(e) => &e.message,
        }
    }

    /// Render this error against its source text with a caret underline.
    ///
    /// Produces output of the form:
    ///
    /// ```text
    /// error: expected ']', found ':'
    ///   --> 1:9
    ///   |
    /// 1 | [1, 2, 3 : 4]
    ///   |          ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let (start, end) = match self {
            Self::Lex(e) => (e.offset, e.offset + 1),
            Self::Parse(e) => (e.span.start as usize, e.span.end as usize),
        };
        let (line, col) = line_col(source, start);

        let mut output = String::new();
        output.push_str(&format!("error: {}\n", self.message()));
        output.push_str(&format!("  --> {}:{}\n", line, col));

        if let Some(line_text) = line_text(source, line) {
            let gutter = line.to_string().len().max(1);
            output.push_str(&format!("{:gutter$} |\n", ""));
            output.push_str(&format!("{:gutter$} | {}\n", line, line_text));

            let width = end
                .saturating_sub(start)
                .min((line_text.len() + 1).saturating_sub(col - 1))
                .max(1);
            let underline = " ".repeat(col - 1) + &"^".repeat(width);
            output.push_str(&format!("{:gutter$} | {}\n", "", underline));
        }

        output
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{}", e),
            Self::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Get the 1-based (line, column) of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (idx, ch) in source.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            line_start = idx + 1;
        }
    }
    (line, offset - line_start + 1)
}

/// Get the text of a 1-based line, without its trailing newline.
fn line_text(source: &str, line: usize) -> Option<&str> {
    source.lines().nth(line - 1)
}
