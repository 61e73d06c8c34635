//! Recursive descent parser for a Jack-like class language
//!
//! This module turns an already-lexed token sequence into a [`tree::ParseTree`]:
//! - [`token`]: token kinds, operators and the token list reader
//! - [`cursor`]: read-only lookahead and single-step advance over a token slice
//! - [`parse`]: the [`parse::Parser`] struct, error types and production dispatch
//! - [`declarations`], [`statements`], [`expressions`]: the grammar productions
//! - [`options`]: parse mode, nesting limit and trace budget
//! - [`tree`]: the labeled output tree, its rendering and reading
//!
//! # Supported Grammar
//!
//! - Classes with `static`/`field` declarations and subroutines
//! - Subroutines with parameter lists, `var` declarations and statements
//! - Statements: `if`/`else`, `while`, `do`, `return` (`let` is not supported)
//! - Expressions: flat operator chains without precedence, constants,
//!   variables, indexing, parentheses and unary operators
//! - No subroutine call arguments (expression lists are not supported)
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent, one method per production, with no
//! external parser generator dependencies. The lexer is out of scope: tokens
//! arrive pre-classified.

pub mod cursor;
pub mod declarations;
pub mod expressions;
pub mod options;
pub mod parse;
pub mod statements;
pub mod token;
pub mod tree;
