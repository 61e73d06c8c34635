//! # Introduction
//!
//! Descent parses a pre-lexed token stream for a small Jack-like class
//! language into a labeled parse tree, optionally recording a trace of every
//! production it enters and every token it consumes. The trace is then
//! navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Token list → TokenCursor → Parser → ParseTree
//!                               ↓
//!                          ParseTrace → ParseHistory → TUI
//! ```
//!
//! 1. [`parser`]: token types, the cursor, the productions and the
//!    [`parser::tree::ParseTree`] they build.
//! 2. [`snapshot`]: trace events captured during a parse, kept under a
//!    configurable memory limit, and replayed by [`snapshot::ParseHistory`].
//! 3. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use descent::parser::parse::parse;
//! use descent::parser::token::Token;
//!
//! let tokens = vec![
//!     Token::keyword("class"),
//!     Token::identifier("Main"),
//!     Token::symbol("{"),
//!     Token::symbol("}"),
//! ];
//! let tree = parse(&tokens).unwrap();
//! assert_eq!(tree.label(), "class");
//! assert_eq!(tree.len(), 4);
//! ```

pub mod parser;
pub mod snapshot;
pub mod ui;
