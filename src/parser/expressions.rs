//! Expression parsing implementation
//!
//! Expressions are flat chains: every binary operator binds equally and the
//! chain is stored as one `expression` node whose children alternate between
//! terms and operators. There is no precedence and no grouping beyond
//! explicit parentheses.
//!
//! # Supported Expressions
//!
//! - `skip`: a standalone no-op marker
//! - Constants: integer, string and keyword constants
//! - Variables, with an optional `[ expression ]` index
//! - Parenthesized sub-expressions
//! - Unary operators applied to a term
//! - Binary operators: `+ - * / & | < > =`
//!
//! Subroutine calls need an expression list, which is not supported.
//!
//! # Grammar
//!
//! ```text
//! expression ::= "skip" | term (op term)*
//! term       ::= constant | varName ("[" expression "]")? | "(" expression ")"
//!              | unaryOp term
//! ```

use crate::parser::parse::{Expectation, ParseError, Parser, Production};
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;

impl<'a> Parser<'a> {
    pub fn parse_expression(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Expression, Self::expression)
    }

    pub fn parse_term(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::Term, Self::term)
    }

    pub fn parse_expression_list(&mut self) -> Result<ParseTree, ParseError> {
        self.descend(Production::ExpressionList, |p| {
            Err(p.unsupported(Production::ExpressionList))
        })
    }

    fn expression(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Expression.label());

        if self.check(TokenKind::Keyword, "skip")? {
            result.add_child(self.take_leaf()?);
            return Ok(result);
        }

        let reference = self.options.is_reference();

        // The reference chain has no leading term
        if !reference {
            result.add_child(self.parse_term()?);
        }

        while self.at_binary_operator()? {
            result.add_child(self.take_leaf()?);
            result.add_child(self.parse_term()?);
        }

        if reference {
            // Reference behavior skips one token after the chain
            self.advance();
        }

        Ok(result)
    }

    fn at_binary_operator(&self) -> Result<bool, ParseError> {
        Ok(self.current()?.binary_operator().is_some())
    }

    fn term(&mut self) -> Result<ParseTree, ParseError> {
        let mut result = ParseTree::node(Production::Term.label());
        let token = self.current()?;

        match token.kind {
            TokenKind::IntegerConstant | TokenKind::StringConstant | TokenKind::KeywordConstant => {
                result.add_child(self.take_leaf()?);
            }
            TokenKind::Identifier => {
                result.add_child(self.take_leaf()?);
                self.variable_suffix(&mut result)?;
            }
            TokenKind::Symbol if token.value == "(" => {
                result.add_child(self.take_leaf()?);
                result.add_child(self.parse_expression()?);
                result.add_child(self.expect_symbol(")")?);
            }
            TokenKind::UnaryOp => {
                result.add_child(self.take_leaf()?);
                if self.options.is_reference() {
                    // The reference wants a token tagged `term` here; none exists
                    return Err(self.unexpected(Expectation::Production(Production::Term)));
                }
                result.add_child(self.parse_term()?);
            }
            TokenKind::Symbol | TokenKind::Keyword => {
                if !self.options.is_reference() {
                    return Err(self.unexpected(Expectation::Production(Production::Term)));
                }
                // Reference behavior: an empty term, nothing consumed
            }
        }

        Ok(result)
    }

    /// Index or call after a variable name
    fn variable_suffix(&mut self, result: &mut ParseTree) -> Result<(), ParseError> {
        let reference = self.options.is_reference();

        if self.check(TokenKind::Symbol, "[")? {
            if reference {
                self.advance();
            } else {
                result.add_child(self.take_leaf()?);
            }
            result.add_child(self.parse_expression()?);
            result.add_child(self.expect_symbol("]")?);
            return Ok(());
        }

        if reference {
            return Ok(());
        }

        let is_call =
            self.check(TokenKind::Symbol, "(")? || self.check(TokenKind::Symbol, ".")?;
        if !is_call {
            return Ok(());
        }

        if self.check(TokenKind::Symbol, ".")? {
            result.add_child(self.take_leaf()?);
            result.add_child(self.expect_kind(TokenKind::Identifier)?);
        }
        result.add_child(self.expect_symbol("(")?);
        result.add_child(self.parse_expression_list()?);
        result.add_child(self.expect_symbol(")")?);

        Ok(())
    }
}
