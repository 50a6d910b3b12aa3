//! Hand-written recursive descent parser for the texpr template
//! expression language.
//!
//! Five entry points cover the top-level forms a template can embed: a
//! single expression, a comma-separated expression list, a variable, a
//! data reference, and a dotted global name. Each entry point tokenizes
//! its input, parses its nonterminal, and requires end-of-input.

pub mod parser;

pub use parser::{
    parse_data_reference, parse_expression, parse_expression_list, parse_global, parse_variable,
    ParseError, ParseErrorKind, SyntaxError,
};

// Re-export lexer
pub use texpr_lexer::{lex, LexError, LexErrorKind, Token};
