//! Declaration parsing implementation
//!
//! This module handles the class-level grammar:
//!
//! - The fixed `class Main { }` program skeleton
//! - Classes with their variable declarations and subroutines
//! - Subroutines: qualifier, return type, name, parameters, body
//! - Local `var` declarations
//!
//! # Grammar
//!
//! ```text
//! class          ::= "class" identifier "{" classVarDec* subroutine* "}"
//! classVarDec    ::= ("static" | "field") type name ("," name)* ";"
//! subroutine     ::= ("constructor" | "function" | "method") type identifier
//!                    "(" parameterList ")" subroutineBody
//! parameterList  ::= (type identifier ("," type identifier)*)?
//! subroutineBody ::= "{" varDec* statements? "}"
//! varDec         ::= "var" type name ("," name)* ";"
//! ```
//!
//! Declaration sections are chosen by the value of the lookahead token alone.
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::parse::{Expectation, ParseError, Parser, Production};
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;

const CLASS_VAR_QUALIFIERS: [&str; 2] = ["static", "field"];
const SUBROUTINE_QUALIFIERS: [&str; 3] = ["function", "method", "constructor"];

impl<'a> Parser<'a> {
    /// Parse the minimal `class Main { }` program
    pub fn parse_program(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Program, Self::program)
    }

    /// Parse a class with its declarations
    pub fn parse_class(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Class, Self::class)
    }

    /// Parse a `static` or `field` declaration.
    ///
    /// The caller has already chosen this production from the lookahead, so
    /// the qualifier is taken without checking its value. Standard mode
    /// still requires a type name after it.
    pub fn parse_class_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::ClassVarDec, Self::class_var_dec)
    }

    /// Parse a constructor, function or method
    pub fn parse_subroutine(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Subroutine, Self::subroutine)
    }

    /// Parse the parameters between the parentheses, leaving `)` in place
    pub fn parse_parameter_list(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::ParameterList, Self::parameter_list)
    }

    pub fn parse_subroutine_body(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::SubroutineBody, Self::subroutine_body)
    }

    pub fn parse_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::VarDec, Self::var_dec)
    }

    fn program(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Program.label());

        result.add_child(self.expect_keyword("class")?);
        result.add_child(self.expect(TokenKind::Identifier, "Main")?);
        result.add_child(self.expect_symbol("{")?);
        result.add_child(self.expect_symbol("}")?);

        Ok(result)
    }

    fn class(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Class.label());

        result.add_child(self.expect_keyword("class")?);
        result.add_child(self.expect_kind(TokenKind::Identifier)?);
        result.add_child(self.expect_symbol("{")?);

        while self.check_value(&CLASS_VAR_QUALIFIERS)? {
            result.add_child(self.parse_class_var_dec()?);
        }

        while self.check_value(&SUBROUTINE_QUALIFIERS)? {
            result.add_child(self.parse_subroutine()?);
        }

        result.add_child(self.expect_symbol("}")?);

        Ok(result)
    }

    fn class_var_dec(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::ClassVarDec.label());

        // Qualifier and type are both shown as keywords
        result.add_child(self.take_as(TokenKind::Keyword)?);
        if !self.options.is_reference() && !self.current()?.kind.is_type_name() {
            return Err(self.unexpected(Expectation::TypeName));
        }
        result.add_child(self.take_as(TokenKind::Keyword)?);

        self.declared_names(&mut result)?;

        Ok(result)
    }

    fn subroutine(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Subroutine.label());

        result.add_child(self.take_as(TokenKind::Keyword)?);
        result.add_child(self.expect_type_name()?);
        result.add_child(self.expect_kind(TokenKind::Identifier)?);

        result.add_child(self.expect_symbol("(")?);
        result.add_child(self.parse_parameter_list()?);
        result.add_child(self.expect_symbol(")")?);

        result.add_child(self.parse_subroutine_body()?);

        Ok(result)
    }

    fn parameter_list(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::ParameterList.label());

        if self.check(TokenKind::Symbol, ")")? {
            return Ok(result);
        }

        loop {
            result.add_child(self.expect_type_name()?);
            result.add_child(self.expect_kind(TokenKind::Identifier)?);

            if !self.check(TokenKind::Symbol, ",")? {
                break;
            }
            result.add_child(self.take_leaf()?);
        }

        Ok(result)
    }

    fn subroutine_body(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::SubroutineBody.label());

        result.add_child(self.expect_symbol("{")?);

        while self.check(TokenKind::Keyword, "var")? {
            result.add_child(self.parse_var_dec()?);
        }

        if !self.check(TokenKind::Symbol, "}")? {
            result.add_child(self.parse_statements()?);
        }

        result.add_child(self.expect_symbol("}")?);

        Ok(result)
    }

    fn var_dec(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::VarDec.label());

        result.add_child(self.expect_keyword("var")?);
        result.add_child(self.expect_type_name()?);

        self.declared_names(&mut result)?;

        Ok(result)
    }

    /// The `name, name ;` tail shared by class and local declarations
    fn declared_names(&mut self, result: &mut ParseTree) -> Result<(), ParseError> {
        if self.options.is_reference() {
            return self.declared_names_unordered(result);
        }

        result.add_child(self.expect_kind(TokenKind::Identifier)?);
        while self.check(TokenKind::Symbol, ",")? {
            result.add_child(self.take_leaf()?);
            result.add_child(self.expect_kind(TokenKind::Identifier)?);
        }
        result.add_child(self.expect_symbol(";")?);

        Ok(())
    }

    /// Names and commas in any order up to `;`
    fn declared_names_unordered(&mut self, result: &mut ParseTree) -> Result<(), ParseError> {
        loop {
            let token = self.current()?;

            if token.kind == TokenKind::Identifier || token.is(TokenKind::Symbol, ",") {
                result.add_child(self.take_leaf()?);
            } else if token.is(TokenKind::Symbol, ";") {
                result.add_child(self.take_leaf()?);
                return Ok(());
            } else {
                return Err(self.unexpected(Expectation::Token {
                    kind: TokenKind::Symbol,
                    value: ";".to_string(),
                }));
            }
        }
    }
}
