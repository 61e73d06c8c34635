//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the production dispatch.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: class, class variables, subroutines, parameters, bodies
//! - `statements`: statement lists and let/if/while/do/return
//! - `expressions`: flat operator chains, terms and expression lists
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Every production runs through [`Parser::descend`], which enforces the
//! nesting limit and feeds the parse trace when one is being recorded.

use crate::parser::cursor::TokenCursor;
use crate::parser::options::ParseOptions;
use crate::parser::token::{Token, TokenKind};
use crate::parser::tree::ParseTree;
use crate::snapshot::{ParseTrace, TraceEvent};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Program,
    Class,
    ClassVarDec,
    Subroutine,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    Let,
    If,
    While,
    Do,
    Return,
    Expression,
    Term,
    ExpressionList,
}

impl Production {
    pub const ALL: [Production; 16] = [
        Production::Program,
        Production::Class,
        Production::ClassVarDec,
        Production::Subroutine,
        Production::ParameterList,
        Production::SubroutineBody,
        Production::VarDec,
        Production::Statements,
        Production::Let,
        Production::If,
        Production::While,
        Production::Do,
        Production::Return,
        Production::Expression,
        Production::Term,
        Production::ExpressionList,
    ];

    /// Grammar name, as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Production::Program => "program",
            Production::Class => "class",
            Production::ClassVarDec => "classVarDec",
            Production::Subroutine => "subroutine",
            Production::ParameterList => "parameterList",
            Production::SubroutineBody => "subroutineBody",
            Production::VarDec => "varDec",
            Production::Statements => "statements",
            Production::Let => "let",
            Production::If => "if",
            Production::While => "while",
            Production::Do => "do",
            Production::Return => "return",
            Production::Expression => "expression",
            Production::Term => "term",
            Production::ExpressionList => "expressionList",
        }
    }

    /// Label of the tree node the production builds
    pub fn label(self) -> &'static str {
        match self {
            Production::Program | Production::Class => "class",
            Production::Let => "letStatement",
            Production::If => "ifStatement",
            Production::While => "whileStatement",
            Production::Do => "doStatement",
            Production::Return => "returnStatement",
            other => other.name(),
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown production '{0}'")]
pub struct UnknownProduction(pub String);

impl FromStr for Production {
    type Err = UnknownProduction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Production::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownProduction(s.to_string()))
    }
}

/// What the grammar required at the point of failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// An exact kind and value
    Token { kind: TokenKind, value: String },
    /// Any token of this kind
    Kind(TokenKind),
    /// A built-in type keyword or a class name
    TypeName,
    /// The first token of a production
    Production(Production),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Token { kind, value } => write!(f, "{} '{}'", kind, value),
            Expectation::Kind(kind) => write!(f, "{}", kind),
            Expectation::TypeName => f.write_str("type (keyword or identifier)"),
            Expectation::Production(p) => write!(f, "start of {}", p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("ran out of tokens")]
    OutOfTokens,

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: Expectation, found: Token },

    #[error("the {production} production is not supported")]
    UnsupportedProduction { production: Production },

    #[error("productions nested deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at token {position}: {reason}")]
pub struct ParseError {
    pub reason: ParseFailure,
    /// Cursor offset when the parse failed
    pub position: usize,
}

/// Recursive descent parser over a borrowed token slice
pub struct Parser<'a> {
    pub(crate) cursor: TokenCursor<'a>,
    pub(crate) options: ParseOptions,
    stack: Vec<Production>,
    trace: Option<ParseTrace>,
}

/// Parse a class from `tokens` with default options.
pub fn parse(tokens: &[Token]) -> Result<ParseTree, ParseError> {
    Parser::new(tokens).parse_class()
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: &'a [Token], options: ParseOptions) -> Self {
        Parser {
            cursor: TokenCursor::new(tokens),
            options,
            stack: Vec::new(),
            trace: options.snapshot_limit.map(ParseTrace::new),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn cursor(&self) -> &TokenCursor<'a> {
        &self.cursor
    }

    /// Hand over the recorded trace, if tracing was enabled
    pub fn take_trace(&mut self) -> Option<ParseTrace> {
        self.trace.take()
    }

    /// Run one production by name
    pub fn parse(&mut self, production: Production) -> Result<ParseTree, ParseError> {
        match production {
            Production::Program => self.parse_program(),
            Production::Class => self.parse_class(),
            Production::ClassVarDec => self.parse_class_var_dec(),
            Production::Subroutine => self.parse_subroutine(),
            Production::ParameterList => self.parse_parameter_list(),
            Production::SubroutineBody => self.parse_subroutine_body(),
            Production::VarDec => self.parse_var_dec(),
            Production::Statements => self.parse_statements(),
            Production::Let => self.parse_let(),
            Production::If => self.parse_if(),
            Production::While => self.parse_while(),
            Production::Do => self.parse_do(),
            Production::Return => self.parse_return(),
            Production::Expression => self.parse_expression(),
            Production::Term => self.parse_term(),
            Production::ExpressionList => self.parse_expression_list(),
        }
    }

    /// Run a production body with the nesting limit and tracing around it
    pub(crate) fn descend(
        &mut self,
        production: Production,
        body: impl FnOnce(&mut Self) -> Result<ParseTree, ParseError>,
    ) -> Result<ParseTree, ParseError> {
        let limit = self.options.depth_limit();
        if self.stack.len() >= limit {
            let err = self.cursor.error(ParseFailure::NestingTooDeep { limit });
            return Err(self.unwind(err));
        }

        self.stack.push(production);
        self.record(TraceEvent::Enter(production));

        match body(self) {
            Ok(tree) => {
                if self.trace.is_some() {
                    self.record(TraceEvent::Exit(production, tree.clone()));
                }
                self.stack.pop();
                Ok(tree)
            }
            Err(err) => {
                self.stack.pop();
                Err(self.unwind(err))
            }
        }
    }

    /// Record the failure once, when it leaves the outermost production
    fn unwind(&mut self, err: ParseError) -> ParseError {
        if self.stack.is_empty() {
            self.record(TraceEvent::Fail(err.clone()));
        }
        err
    }

    fn record(&mut self, event: TraceEvent) {
        self.record_at(self.cursor.position(), event);
    }

    fn record_at(&mut self, position: usize, event: TraceEvent) {
        if let Some(trace) = self.trace.as_mut() {
            trace.record(position, &self.stack, event);
        }
    }

    /// Trace a token the cursor consumed at `position`
    fn consumed(&mut self, position: usize, token: &Token) -> ParseTree {
        if self.trace.is_some() {
            self.record_at(position, TraceEvent::Consume(token.clone()));
        }
        ParseTree::leaf(token)
    }

    // ===== Helper methods =====

    pub(crate) fn current(&self) -> Result<&'a Token, ParseError> {
        self.cursor.current()
    }

    pub(crate) fn check(&self, kind: TokenKind, value: &str) -> Result<bool, ParseError> {
        self.cursor.check(kind, value)
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> Result<bool, ParseError> {
        self.cursor.check_kind(kind)
    }

    /// Lookahead on the value alone, whatever the kind
    pub(crate) fn check_value(&self, values: &[&str]) -> Result<bool, ParseError> {
        let token = self.current()?;
        Ok(values.contains(&token.value.as_str()))
    }

    pub(crate) fn advance(&mut self) {
        if let Some(token) = self.cursor.peek() {
            self.record(TraceEvent::Consume(token.clone()));
        }
        self.cursor.advance();
    }

    /// Consume the current token and return it as a leaf
    pub(crate) fn take_leaf(&mut self) -> Result<ParseTree, ParseError> {
        let leaf = ParseTree::leaf(self.current()?);
        self.advance();
        Ok(leaf)
    }

    /// Consume the current token's value re-wrapped under another kind
    pub(crate) fn take_as(&mut self, kind: TokenKind) -> Result<ParseTree, ParseError> {
        let token = Token::new(kind, self.current()?.value.clone());
        self.advance();
        Ok(ParseTree::leaf(&token))
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, value: &str) -> Result<ParseTree, ParseError> {
        let position = self.cursor.position();
        let token = self.cursor.expect(kind, value)?;
        Ok(self.consumed(position, token))
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> Result<ParseTree, ParseError> {
        let position = self.cursor.position();
        let token = self.cursor.expect_kind(kind)?;
        Ok(self.consumed(position, token))
    }

    pub(crate) fn expect_keyword(&mut self, value: &str) -> Result<ParseTree, ParseError> {
        self.expect(TokenKind::Keyword, value)
    }

    pub(crate) fn expect_symbol(&mut self, value: &str) -> Result<ParseTree, ParseError> {
        self.expect(TokenKind::Symbol, value)
    }

    /// A built-in type keyword or a class name
    pub(crate) fn expect_type_name(&mut self) -> Result<ParseTree, ParseError> {
        if self.current()?.kind.is_type_name() {
            self.take_leaf()
        } else {
            Err(self.unexpected(Expectation::TypeName))
        }
    }

    /// `UnexpectedToken` against the current token; `OutOfTokens` when exhausted
    pub(crate) fn unexpected(&self, expected: Expectation) -> ParseError {
        match self.current() {
            Ok(found) => self.cursor.unexpected(expected, found),
            Err(err) => err,
        }
    }

    pub(crate) fn unsupported(&self, production: Production) -> ParseError {
        self.cursor
            .error(ParseFailure::UnsupportedProduction { production })
    }
}
