//! Foundation types shared across the expression pipeline.

pub mod span;

pub use span::Span;
