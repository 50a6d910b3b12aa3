//! Expression tree produced by the parser.

pub mod expr;

pub use expr::{BinaryOp, Expr, ExprKind, ExprRoot, UnaryOp};
