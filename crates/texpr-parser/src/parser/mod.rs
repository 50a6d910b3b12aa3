//! Hand-written recursive descent parser for texpr expressions.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead
//! - `error`: ParseError and the public SyntaxError surface
//! - `expr`: expression parser (precedence climbing, atoms, data refs)
//!
//! ## Public API
//!
//! Five entry points, one per top-level form a template can embed. Each
//! tokenizes its input, parses its nonterminal, and requires end-of-input;
//! a trailing token is a [`ParseErrorKind::TrailingInput`] error.
//!
//! ```
//! # use texpr_parser::parser::parse_expression;
//! let root = parse_expression("1 + 2 * 3").unwrap();
//! ```

mod error;
mod stream;

pub use error::{ParseError, ParseErrorKind, SyntaxError};
use stream::TokenStream;

mod expr;

use texpr_ast::{Expr, ExprKind, ExprRoot};
use texpr_lexer::{lex, Token};

/// Parse a comma-separated list of one or more expressions.
///
/// No trailing comma. Each expression gets its own root.
///
/// # Errors
/// The first lexical or grammatical error, including an empty input.
pub fn parse_expression_list(source: &str) -> Result<Vec<ExprRoot>, SyntaxError> {
    let tokens = lex(source)?;
    let mut stream = TokenStream::new(&tokens);

    let mut roots = vec![ExprRoot::new(expr::parse_expr(&mut stream)?)];
    while matches!(stream.peek(), Some(Token::Comma)) {
        stream.advance();
        roots.push(ExprRoot::new(expr::parse_expr(&mut stream)?));
    }

    expect_end(&stream)?;
    Ok(roots)
}

/// Parse a single expression.
///
/// # Errors
/// The first lexical or grammatical error.
pub fn parse_expression(source: &str) -> Result<ExprRoot, SyntaxError> {
    let tokens = lex(source)?;
    let mut stream = TokenStream::new(&tokens);

    let parsed = expr::parse_expr(&mut stream)?;
    expect_end(&stream)?;
    Ok(ExprRoot::new(parsed))
}

/// Parse a standalone variable: `$IDENT`.
///
/// # Errors
/// The first lexical or grammatical error; the reserved name `ij` is
/// rejected.
pub fn parse_variable(source: &str) -> Result<ExprRoot, SyntaxError> {
    let tokens = lex(source)?;
    let mut stream = TokenStream::new(&tokens);

    let start = stream.current_pos();
    let name = match stream.peek() {
        Some(Token::DollarIdent(s)) => s.to_string(),
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in variable",
                stream.current_span(),
            )
            .into());
        }
    };
    if name == "ij" {
        return Err(ParseError::reserved_ij(stream.current_span()).into());
    }
    stream.advance();

    let parsed = Expr::new(ExprKind::Var(name), stream.span_from(start));
    expect_end(&stream)?;
    Ok(ExprRoot::new(parsed))
}

/// Parse a data reference: `( "$ij." IDENT | $IDENT ) step*`.
///
/// # Errors
/// The first lexical or grammatical error; the reserved name `ij` is
/// rejected as a non-injected base.
pub fn parse_data_reference(source: &str) -> Result<ExprRoot, SyntaxError> {
    let tokens = lex(source)?;
    let mut stream = TokenStream::new(&tokens);

    let parsed = expr::parse_data_ref(&mut stream)?;
    expect_end(&stream)?;
    Ok(ExprRoot::new(parsed))
}

/// Parse a dotted global name: `IDENT (DOT_IDENT)*`.
///
/// # Errors
/// The first lexical or grammatical error.
pub fn parse_global(source: &str) -> Result<ExprRoot, SyntaxError> {
    let tokens = lex(source)?;
    let mut stream = TokenStream::new(&tokens);

    let parsed = expr::parse_global(&mut stream)?;
    expect_end(&stream)?;
    Ok(ExprRoot::new(parsed))
}

/// Require that every significant token was consumed.
fn expect_end(stream: &TokenStream) -> Result<(), ParseError> {
    match stream.peek() {
        None => Ok(()),
        Some(token) => Err(ParseError::trailing_input(token, stream.current_span())),
    }
}
