//! Statement parsing implementation
//!
//! This module handles statement lists and the five statement forms:
//!
//! - `let` (not supported; always fails with `UnsupportedProduction`)
//! - `if` with an optional `else` block
//! - `while`
//! - `do`
//! - `return` with an optional value
//!
//! # Grammar
//!
//! ```text
//! statements      ::= statement*
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! ifStatement     ::= "if" expression "{" statements "}"
//!                     ("else" "{" statements "}")?
//! whileStatement  ::= "while" expression "{" statements "}"
//! doStatement     ::= "do" expression ";"
//! returnStatement ::= "return" expression? ";"
//! ```
//!
//! Conditions are plain expressions; parentheses around them are read as a
//! parenthesized term.

use crate::parser::parse::{ParseError, Parser, Production};
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;

impl<'a> Parser<'a> {
    /// Parse statements until the first token that does not start one
    pub fn parse_statements(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Statements, Self::statements)
    }

    pub fn parse_let(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Let, |p| Err(p.unsupported(Production::Let)))
    }

    pub fn parse_if(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::If, Self::if_statement)
    }

    pub fn parse_while(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::While, Self::while_statement)
    }

    pub fn parse_do(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Do, Self::do_statement)
    }

    pub fn parse_return(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Return, Self::return_statement)
    }

    fn statements(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Statements.label());

        while let Some(production) = self.statement_production()? {
            result.add_child(self.parse(production)?);

            if self.options.is_reference() {
                // Reference behavior skips one token after every statement
                self.advance();
            }
        }

        Ok(result)
    }

    /// Which statement the lookahead keyword starts, if any
    fn statement_production(&self) -> Result<Option<Production>, ParseError> {
        let token = self.current()?;
        if token.kind != TokenKind::Keyword {
            return Ok(None);
        }

        Ok(match token.value.as_str() {
            "return" => Some(Production::Return),
            "let" => Some(Production::Let),
            "if" => Some(Production::If),
            "while" => Some(Production::While),
            "do" => Some(Production::Do),
            _ => None,
        })
    }

    fn if_statement(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::If.label());

        result.add_child(self.expect_keyword("if")?);
        result.add_child(self.parse_expression()?);
        self.block(&mut result)?;

        if self.check(TokenKind::Keyword, "else")? {
            if self.options.is_reference() {
                self.advance();
            } else {
                result.add_child(self.take_leaf()?);
            }
            self.block(&mut result)?;
        }

        Ok(result)
    }

    fn while_statement(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::While.label());

        result.add_child(self.expect_keyword("while")?);
        result.add_child(self.parse_expression()?);
        self.block(&mut result)?;

        Ok(result)
    }

    fn do_statement(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Do.label());

        result.add_child(self.expect_keyword("do")?);
        result.add_child(self.parse_expression()?);
        result.add_child(self.expect_symbol(";")?);

        Ok(result)
    }

    fn return_statement(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Return.label());

        let keyword = if self.options.is_reference() {
            "result"
        } else {
            "return"
        };
        result.add_child(self.expect_keyword(keyword)?);

        if self.check(TokenKind::Symbol, ";")? {
            result.add_child(self.take_leaf()?);
            return Ok(result);
        }

        result.add_child(self.parse_expression()?);
        result.add_child(self.expect_symbol(";")?);

        Ok(result)
    }

    /// `{ statements }`, appended to the enclosing statement
    fn block(&mut self, result: &mut ParseTree) -> Result<(), ParseError> {
        result.add_child(self.expect_symbol("{")?);
        result.add_child(self.parse_statements()?);
        result.add_child(self.expect_symbol("}")?);
        Ok(())
    }
}
