//! Atomic expressions - literals, parenthesized expressions, function
//! calls, and the bracket literals.

use super::super::{ParseError, TokenStream};
use super::dataref;
use texpr_ast::{Expr, ExprKind};
use texpr_lexer::Token;

/// Parse an atomic expression.
///
/// Dispatch order follows the grammar: parenthesized expression, function
/// call vs. reference (one-token lookahead on `IDENT (`), data reference,
/// global, bracket literal, primitive literal.
pub(super) fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();

    match stream.peek() {
        Some(Token::LParen) => parse_parenthesized(stream),
        Some(Token::Null) => {
            stream.advance();
            Ok(Expr::new(ExprKind::Null, stream.span_from(start)))
        }
        Some(Token::True) => {
            stream.advance();
            Ok(Expr::new(ExprKind::Bool(true), stream.span_from(start)))
        }
        Some(Token::False) => {
            stream.advance();
            Ok(Expr::new(ExprKind::Bool(false), stream.span_from(start)))
        }
        Some(Token::Integer(_)) | Some(Token::Float(_)) | Some(Token::Str(_)) => {
            parse_primitive_literal(stream)
        }
        Some(Token::DollarIdent(_)) | Some(Token::DollarIjDot) => dataref::parse_data_ref(stream),
        Some(Token::Ident(_)) => {
            // `IDENT (` starts a function call; a bare identifier chain is
            // a global reference
            if matches!(stream.peek_nth(1), Some(Token::LParen)) {
                parse_function_call(stream)
            } else {
                dataref::parse_global(stream)
            }
        }
        Some(Token::LBracket) => parse_bracket_literal(stream),
        other => Err(ParseError::unexpected_token(
            other,
            "in expression",
            stream.current_span(),
        )),
    }
}

/// Parse an integer, float, or string literal.
fn parse_primitive_literal(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();

    let kind = match stream.advance() {
        Some(Token::Integer(n)) => ExprKind::Int(*n),
        Some(Token::Float(x)) => ExprKind::Float(*x),
        Some(Token::Str(s)) => ExprKind::Str(s.to_string()),
        other => {
            return Err(ParseError::unexpected_token(other, "literal", span));
        }
    };

    Ok(Expr::new(kind, stream.span_from(start)))
}

/// Parse a parenthesized expression.
///
/// Parentheses group only; no node survives them.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    stream.expect(Token::LParen)?;
    let expr = super::parse_expr(stream)?;
    stream.expect(Token::RParen)?;
    Ok(expr)
}

/// Parse a function call: `name(arg, ...)`.
///
/// No trailing comma in the argument list.
fn parse_function_call(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();

    let name = match stream.advance() {
        Some(Token::Ident(s)) => s.to_string(),
        other => {
            return Err(ParseError::unexpected_token(other, "function name", span));
        }
    };

    stream.expect(Token::LParen)?;

    let mut args = Vec::new();
    if !matches!(stream.peek(), Some(Token::RParen)) {
        loop {
            args.push(super::parse_expr(stream)?);
            if matches!(stream.peek(), Some(Token::RParen)) {
                break;
            }
            stream.expect(Token::Comma)?;
        }
    }

    stream.expect(Token::RParen)?;

    Ok(Expr::new(
        ExprKind::Call { name, args },
        stream.span_from(start),
    ))
}

/// Parse a bracket literal: a list or a map.
///
/// Disambiguation without rewinding: `[]` is the empty list and `[:]` the
/// empty map; otherwise parse one expression and branch on whether a `:`
/// follows it.
fn parse_bracket_literal(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LBracket)?;

    // []
    if matches!(stream.peek(), Some(Token::RBracket)) {
        stream.advance();
        return Ok(Expr::new(
            ExprKind::List(Vec::new()),
            stream.span_from(start),
        ));
    }

    // [:]
    if matches!(stream.peek(), Some(Token::Colon)) {
        stream.advance();
        stream.expect(Token::RBracket)?;
        return Ok(Expr::new(
            ExprKind::Map(Vec::new()),
            stream.span_from(start),
        ));
    }

    check_map_key(stream)?;
    let first = super::parse_expr(stream)?;

    if matches!(stream.peek(), Some(Token::Colon)) {
        parse_map_literal(stream, start, first)
    } else {
        parse_list_literal(stream, start, first)
    }
}

/// Parse the rest of a list literal after its first element.
///
/// A trailing comma is allowed (`,` directly followed by `]`).
fn parse_list_literal(
    stream: &mut TokenStream,
    start: usize,
    first: Expr,
) -> Result<Expr, ParseError> {
    let mut items = vec![first];

    while matches!(stream.peek(), Some(Token::Comma)) {
        stream.advance();
        if matches!(stream.peek(), Some(Token::RBracket)) {
            break;
        }
        items.push(super::parse_expr(stream)?);
    }

    stream.expect(Token::RBracket)?;
    Ok(Expr::new(ExprKind::List(items), stream.span_from(start)))
}

/// Parse the rest of a map literal after its first key.
///
/// Entries alternate key, value in the children list. A trailing comma is
/// allowed after at least one entry.
fn parse_map_literal(
    stream: &mut TokenStream,
    start: usize,
    first_key: Expr,
) -> Result<Expr, ParseError> {
    stream.expect(Token::Colon)?;

    let mut entries = vec![first_key];
    entries.push(super::parse_expr(stream)?);

    while matches!(stream.peek(), Some(Token::Comma)) {
        stream.advance();
        if matches!(stream.peek(), Some(Token::RBracket)) {
            break;
        }
        check_map_key(stream)?;
        entries.push(super::parse_expr(stream)?);
        stream.expect(Token::Colon)?;
        entries.push(super::parse_expr(stream)?);
    }

    stream.expect(Token::RBracket)?;
    Ok(Expr::new(ExprKind::Map(entries), stream.span_from(start)))
}

/// Reject an unquoted single-identifier map key before consuming it.
///
/// `[foo: 1]` is ambiguous with other map syntaxes, so the grammar
/// requires `['foo': 1]` (string key) or `[(foo): 1]` (global key).
fn check_map_key(stream: &TokenStream) -> Result<(), ParseError> {
    if matches!(stream.peek(), Some(Token::Ident(_)))
        && matches!(stream.peek_nth(1), Some(Token::Colon))
    {
        return Err(ParseError::disallowed_map_key(stream.current_span()));
    }
    Ok(())
}
