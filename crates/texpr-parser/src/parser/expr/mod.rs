//! Expression parser using precedence climbing.
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `? :` (ternary) - right associative, handled above the climber
//! 2. `or` - left associative
//! 3. `and` - left associative
//! 4. `==`, `!=` - left associative
//! 5. `<`, `<=`, `>`, `>=` - left associative
//! 6. `+`, `-` - left associative
//! 7. `*`, `/`, `%` - left associative
//! 8. Unary `-`, `not` - prefix
//!
//! ## Module Organization
//!
//! - `pratt` - climbing core (binary operators, ternary, unary prefix)
//! - `atoms` - atomic expressions (literals, parens, calls, list/map)
//! - `dataref` - data references (`$x`, `$ij.x`) and dotted globals

mod atoms;
mod dataref;
mod pratt;

use super::{ParseError, TokenStream};
use texpr_ast::Expr;

/// Parse a full expression (ternary and below).
pub(super) fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    pratt::parse_ternary(stream)
}

/// Parse a data reference without the expression machinery around it.
///
/// Used by the data-reference entry point, which accepts only this form.
pub(super) fn parse_data_ref(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    dataref::parse_data_ref(stream)
}

/// Parse a dotted global name without the expression machinery around it.
///
/// Used by the global entry point, which accepts only this form.
pub(super) fn parse_global(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    dataref::parse_global(stream)
}
