//! Tokens consumed by the parser
//!
//! Tokens arrive already classified. Each one pairs a [`TokenKind`] with the
//! literal text the scanner saw. The parser never looks inside the text beyond
//! comparing it, so `value` is kept as a plain `String`.
//!
//! This module also reads pre-lexed token lists from text, one token per line:
//!
//! ```text
//! # class Main { }
//! keyword class
//! identifier Main
//! symbol {
//! symbol }
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Symbol,
    IntegerConstant,
    StringConstant,
    KeywordConstant,
    UnaryOp,
}

impl TokenKind {
    pub const ALL: [TokenKind; 7] = [
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Symbol,
        TokenKind::IntegerConstant,
        TokenKind::StringConstant,
        TokenKind::KeywordConstant,
        TokenKind::UnaryOp,
    ];

    /// The tag used in token lists and as the label of leaf nodes
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::KeywordConstant => "keywordConstant",
            TokenKind::UnaryOp => "unaryOp",
        }
    }

    /// Types may be built-in (keyword) or a class name (identifier)
    pub fn is_type_name(self) -> bool {
        matches!(self, TokenKind::Keyword | TokenKind::Identifier)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown token kind '{0}'")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| UnknownTokenKind(s.to_string()))
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Token::new(TokenKind::Keyword, value)
    }

    pub fn identifier(value: impl Into<String>) -> Self {
        Token::new(TokenKind::Identifier, value)
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Token::new(TokenKind::Symbol, value)
    }

    pub fn integer(value: impl Into<String>) -> Self {
        Token::new(TokenKind::IntegerConstant, value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Token::new(TokenKind::StringConstant, value)
    }

    pub fn keyword_constant(value: impl Into<String>) -> Self {
        Token::new(TokenKind::KeywordConstant, value)
    }

    pub fn unary_op(value: impl Into<String>) -> Self {
        Token::new(TokenKind::UnaryOp, value)
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    /// The binary operator this token spells, if it is one
    pub fn binary_operator(&self) -> Option<BinaryOperator> {
        if self.kind != TokenKind::Symbol {
            return None;
        }
        BinaryOperator::from_symbol(&self.value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.value)
    }
}

/// The fixed set of binary operators in an expression chain.
///
/// All operators bind equally; a chain is kept flat in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 9] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::Lt,
        BinaryOperator::Gt,
        BinaryOperator::Eq,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::And => "&",
            BinaryOperator::Or => "|",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Eq => "=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        BinaryOperator::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
    }
}

/// Token list reading error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenListError {
    #[error("line {line}: unknown token kind '{kind}'")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: token has no value")]
    MissingValue { line: usize },
}

/// Read a token list, one `kind value` pair per line.
///
/// The value is everything after the first run of whitespace, so string
/// constants keep their inner spaces. Blank lines and `#` comments are skipped.
pub fn read_token_list(text: &str) -> Result<Vec<Token>, TokenListError> {
    let mut tokens = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.trim_end();
        let content = content.trim_start();

        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let (tag, rest) = match content.split_once(char::is_whitespace) {
            Some((tag, rest)) => (tag, rest.trim_start()),
            None => (content, ""),
        };

        let kind = tag
            .parse::<TokenKind>()
            .map_err(|UnknownTokenKind(kind)| TokenListError::UnknownKind { line, kind })?;

        if rest.is_empty() {
            return Err(TokenListError::MissingValue { line });
        }

        tokens.push(Token::new(kind, rest));
    }

    Ok(tokens)
}
