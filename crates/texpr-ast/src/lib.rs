//! AST types for the texpr template expression language.
//!
//! This crate defines what the parser produces: a tree of [`Expr`] nodes,
//! each carrying its source [`Span`], wrapped in an [`ExprRoot`] that later
//! compiler passes can re-root in place.
//!
//! The crate is deliberately free of parsing logic; it is the shared
//! vocabulary between the parser and the template compiler passes that
//! consume its output.

pub mod ast;
pub mod foundation;

pub use ast::{BinaryOp, Expr, ExprKind, ExprRoot, UnaryOp};
pub use foundation::Span;
