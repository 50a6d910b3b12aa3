//! Data references and globals.
//!
//! A data reference is a chain of access steps rooted at a variable:
//! dotted keys (`.name`), numeric indices (`.0`), and bracketed
//! expressions (`[expr]`). The `$ij.` prefix addresses the injected-data
//! namespace. A global is a bare dotted identifier path resolved by a
//! later pass.

use super::super::{ParseError, TokenStream};
use texpr_ast::{Expr, ExprKind};
use texpr_lexer::Token;

/// Parse a data reference: `( "$ij." IDENT | $IDENT ) step*`.
///
/// The first step of the resulting node is always a `DataKey`. The
/// reserved name `ij` is rejected in the non-injected form; the injected
/// form takes whatever identifier follows the dot as its base key.
pub(super) fn parse_data_ref(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();

    let injected = match stream.peek() {
        Some(Token::DollarIjDot) => true,
        Some(Token::DollarIdent(name)) => {
            if name.as_ref() == "ij" {
                return Err(ParseError::reserved_ij(stream.current_span()));
            }
            false
        }
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in data reference",
                stream.current_span(),
            ));
        }
    };

    let base = if injected {
        stream.advance(); // $ij.
        let key_start = stream.current_pos();
        let span = stream.current_span();
        let name = match stream.advance() {
            Some(Token::Ident(s)) => s.to_string(),
            other => {
                return Err(ParseError::unexpected_token(other, "after '$ij.'", span));
            }
        };
        Expr::new(ExprKind::DataKey(name), stream.span_from(key_start))
    } else {
        let span = stream.current_span();
        let name = match stream.advance() {
            Some(Token::DollarIdent(s)) => s.to_string(),
            other => {
                return Err(ParseError::unexpected_token(other, "in data reference", span));
            }
        };
        Expr::new(ExprKind::DataKey(name), stream.span_from(start))
    };

    let mut steps = vec![base];

    loop {
        match stream.peek() {
            Some(Token::DotIdent(_)) => {
                let step_start = stream.current_pos();
                let span = stream.current_span();
                let name = match stream.advance() {
                    Some(Token::DotIdent(s)) => s.to_string(),
                    other => {
                        return Err(ParseError::unexpected_token(other, "access key", span));
                    }
                };
                steps.push(Expr::new(
                    ExprKind::DataKey(name),
                    stream.span_from(step_start),
                ));
            }
            Some(Token::DotIndex(_)) => {
                let step_start = stream.current_pos();
                let span = stream.current_span();
                let index = match stream.advance() {
                    Some(Token::DotIndex(n)) => *n,
                    other => {
                        return Err(ParseError::unexpected_token(other, "access index", span));
                    }
                };
                steps.push(Expr::new(
                    ExprKind::DataIndex(index),
                    stream.span_from(step_start),
                ));
            }
            Some(Token::LBracket) => {
                // Bracket indexing: the expression itself is the step
                stream.advance();
                steps.push(super::parse_expr(stream)?);
                stream.expect(Token::RBracket)?;
            }
            _ => break,
        }
    }

    Ok(Expr::new(
        ExprKind::DataRef { injected, steps },
        stream.span_from(start),
    ))
}

/// Parse a global reference: `IDENT (DOT_IDENT)*`.
///
/// The node carries the full dotted name; segments are resolved against
/// registered globals by a later pass.
pub(super) fn parse_global(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();

    let mut name = match stream.advance() {
        Some(Token::Ident(s)) => s.to_string(),
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in global reference",
                span,
            ));
        }
    };

    loop {
        let segment = match stream.peek() {
            Some(Token::DotIdent(s)) => s.to_string(),
            _ => break,
        };
        stream.advance();
        name.push('.');
        name.push_str(&segment);
    }

    Ok(Expr::new(ExprKind::Global(name), stream.span_from(start)))
}
