//! Concrete parse tree
//!
//! Every production builds one [`ParseTree`] node and appends its children in
//! grammar order. Children are owned by value, so a node has exactly one
//! parent and a finished subtree is moved, not shared, into the node above it.
//!
//! # Rendering
//!
//! `Display` writes one node per line, indented two spaces per level:
//!
//! ```text
//! class
//!   keyword class
//!   identifier Main
//!   symbol {
//!   symbol }
//! ```
//!
//! [`ParseTree::from_rendering`] reads that form back.

use crate::parser::token::Token;
use std::fmt;
use thiserror::Error;

const INDENT: usize = 2;

/// A labeled node with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    label: String,
    value: String,
    children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        ParseTree {
            label: label.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// A structural node (empty value)
    pub fn node(label: impl Into<String>) -> Self {
        ParseTree::new(label, String::new())
    }

    /// A leaf copied from a token, labeled with the token's kind
    pub fn leaf(token: &Token) -> Self {
        ParseTree::new(token.kind.tag(), token.value.clone())
    }

    pub fn add_child(&mut self, child: ParseTree) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: ParseTree) -> Self {
        self.children.push(child);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn children(&self) -> &[ParseTree] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&ParseTree> {
        self.children.get(index)
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of the direct children, in order
    pub fn labels(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.label()).collect()
    }

    /// Values of the direct children, in order
    pub fn values(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.value()).collect()
    }

    pub fn is_leaf_of(&self, token: &Token) -> bool {
        self.children.is_empty() && self.label == token.kind.tag() && self.value == token.value
    }

    /// Total number of nodes, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Height of the tree; a lone node has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Pre-order walk yielding `(depth, node)`, root at depth 0
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![(0, self)],
        }
    }

    /// Rebuild a tree from its `Display` rendering.
    pub fn from_rendering(text: &str) -> Result<ParseTree, RenderingError> {
        // Open nodes along the current path, root first
        let mut path: Vec<ParseTree> = Vec::new();
        let mut root_seen = false;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            if raw.is_empty() {
                continue;
            }

            let content = raw.trim_start_matches(' ');
            let indent = raw.len() - content.len();
            if indent % INDENT != 0 {
                return Err(RenderingError::OddIndent { line });
            }
            let depth = indent / INDENT;

            if depth == 0 && root_seen {
                return Err(RenderingError::MultipleRoots { line });
            }
            if depth > path.len() || (depth > 0 && !root_seen) {
                return Err(RenderingError::IndentJump { line });
            }

            while path.len() > depth {
                close_last(&mut path);
            }

            let (label, value) = match content.split_once(' ') {
                Some((label, value)) => (label, unescape(value, line)?),
                None => (content, String::new()),
            };

            path.push(ParseTree::new(label, value));
            root_seen = true;
        }

        while path.len() > 1 {
            close_last(&mut path);
        }
        path.pop().ok_or(RenderingError::Empty)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.label, width = depth * INDENT)?;
        if !self.value.is_empty() {
            write!(f, " {}", escape(&self.value))?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.render(f, depth + 1)?;
        }
        Ok(())
    }
}

fn close_last(path: &mut Vec<ParseTree>) {
    if let Some(done) = path.pop() {
        if let Some(parent) = path.last_mut() {
            parent.add_child(done);
        }
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(value: &str, line: usize) -> Result<String, RenderingError> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            _ => return Err(RenderingError::BadEscape { line }),
        }
    }
    Ok(out)
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

/// Pre-order iterator over a tree
pub struct Iter<'a> {
    stack: Vec<(usize, &'a ParseTree)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a ParseTree);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderingError {
    #[error("rendering is empty")]
    Empty,

    #[error("line {line}: indentation is not a multiple of two")]
    OddIndent { line: usize },

    #[error("line {line}: indentation skips a level")]
    IndentJump { line: usize },

    #[error("line {line}: second root node")]
    MultipleRoots { line: usize },

    #[error("line {line}: invalid escape in value")]
    BadEscape { line: usize },
}
