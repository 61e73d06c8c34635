// Integration tests for the grammar in standard mode

use descent::parser::cursor::TokenCursor;
use descent::parser::options::{ParseOptions, MAX_DEPTH_CEILING};
use descent::parser::parse::{Expectation, ParseFailure, Parser, Production};
use descent::parser::token::{read_token_list, Token, TokenKind};
use descent::parser::tree::ParseTree;
use std::fs;
use std::path::Path;

fn token_list(text: &str) -> Vec<Token> {
    read_token_list(text).expect("Token list should be valid")
}

/// `depth` nested parentheses around `x`, followed by `;`
fn nested_parens(depth: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    tokens.extend((0..depth).map(|_| Token::symbol("(")));
    tokens.push(Token::identifier("x"));
    tokens.extend((0..depth).map(|_| Token::symbol(")")));
    tokens.push(Token::symbol(";"));
    tokens
}

#[test]
fn test_program_skeleton() {
    let tokens = token_list(
        "
        keyword class
        identifier Main
        symbol {
        symbol }
        ",
    );

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_program().expect("Parsing failed");

    assert_eq!(tree.label(), "class");
    assert_eq!(tree.len(), 4);
    for (child, token) in tree.children().iter().zip(&tokens) {
        assert!(child.is_leaf_of(token));
    }
    assert!(parser.cursor().is_exhausted());
}

#[test]
fn test_unexpected_token_names_expectation() {
    let tokens = token_list(
        "
        keyword class
        identifier Foo
        symbol {
        symbol }
        ",
    );

    let err = Parser::new(&tokens).parse_program().unwrap_err();
    assert_eq!(err.position, 1);
    match err.reason {
        ParseFailure::UnexpectedToken { expected, found } => {
            assert_eq!(
                expected,
                Expectation::Token {
                    kind: TokenKind::Identifier,
                    value: "Main".to_string()
                }
            );
            assert_eq!(found, Token::identifier("Foo"));
        }
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_out_of_tokens() {
    let tokens = token_list(
        "
        keyword class
        identifier Main
        symbol {
        ",
    );

    let err = Parser::new(&tokens).parse_class().unwrap_err();
    assert_eq!(err.reason, ParseFailure::OutOfTokens);
    assert_eq!(err.position, 3);
}

#[test]
fn test_parameter_list_pairs() {
    let tokens = token_list(
        "
        keyword int
        identifier a
        symbol ,
        keyword boolean
        identifier b
        symbol ,
        identifier Point
        identifier c
        symbol )
        ",
    );

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_parameter_list().expect("Parsing failed");

    // N pairs give 2N names and types plus N - 1 commas
    assert_eq!(tree.label(), "parameterList");
    assert_eq!(tree.len(), 3 * 3 - 1);
    assert_eq!(
        tree.values(),
        vec!["int", "a", ",", "boolean", "b", ",", "Point", "c"]
    );
    // The closing parenthesis belongs to the subroutine
    assert_eq!(parser.cursor().position(), 8);
    assert!(parser.cursor().check(TokenKind::Symbol, ")").unwrap());
}

#[test]
fn test_empty_parameter_list() {
    let tokens = vec![Token::symbol(")")];

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_parameter_list().expect("Parsing failed");

    assert!(tree.is_empty());
    assert_eq!(parser.cursor().position(), 0);
}

#[test]
fn test_check_is_read_only() {
    let tokens = vec![Token::keyword("var"), Token::keyword("int")];
    let cursor = TokenCursor::new(&tokens);

    for _ in 0..3 {
        assert!(cursor.check(TokenKind::Keyword, "var").unwrap());
        assert!(!cursor.check(TokenKind::Symbol, "var").unwrap());
        assert_eq!(cursor.position(), 0);
    }

    let empty: Vec<Token> = Vec::new();
    let cursor = TokenCursor::new(&empty);
    let err = cursor.check(TokenKind::Keyword, "var").unwrap_err();
    assert_eq!(err.reason, ParseFailure::OutOfTokens);
}

#[test]
fn test_class_var_dec() {
    let tokens = token_list(
        "
        keyword static
        keyword int
        identifier a
        symbol ,
        identifier b
        symbol ;
        ",
    );

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_class_var_dec().expect("Parsing failed");

    assert_eq!(tree.label(), "classVarDec");
    assert_eq!(
        tree.labels(),
        vec!["keyword", "keyword", "identifier", "symbol", "identifier", "symbol"]
    );
    assert_eq!(tree.values(), vec!["static", "int", "a", ",", "b", ";"]);
    assert!(parser.cursor().is_exhausted());
}

#[test]
fn test_class_var_dec_type_is_rewrapped() {
    // A class-typed field is still shown as a keyword leaf
    let tokens = token_list(
        "
        keyword field
        identifier Point
        identifier origin
        symbol ;
        ",
    );

    let tree = Parser::new(&tokens).parse_class_var_dec().unwrap();
    assert_eq!(tree.child(1), Some(&ParseTree::new("keyword", "Point")));
}

#[test]
fn test_var_dec_requires_separators() {
    let tokens = token_list(
        "
        keyword var
        keyword int
        identifier a
        identifier b
        symbol ;
        ",
    );

    let err = Parser::new(&tokens).parse_var_dec().unwrap_err();
    assert_eq!(err.position, 3);
    assert!(matches!(
        err.reason,
        ParseFailure::UnexpectedToken {
            expected: Expectation::Token { kind: TokenKind::Symbol, .. },
            ..
        }
    ));
}

#[test]
fn test_subroutine_return_type() {
    let tokens = token_list(
        "
        keyword function
        symbol (
        ",
    );

    let err = Parser::new(&tokens).parse_subroutine().unwrap_err();
    assert_eq!(err.position, 1);
    assert!(matches!(
        err.reason,
        ParseFailure::UnexpectedToken {
            expected: Expectation::TypeName,
            ..
        }
    ));
}

#[test]
fn test_flat_expression_chain() {
    let tokens = token_list(
        "
        identifier a
        symbol +
        identifier b
        symbol -
        identifier c
        symbol ;
        ",
    );

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_expression().expect("Parsing failed");

    assert_eq!(tree.label(), "expression");
    assert_eq!(
        tree.labels(),
        vec!["term", "symbol", "term", "symbol", "term"]
    );
    assert_eq!(tree.children()[1].value(), "+");
    assert_eq!(tree.children()[3].value(), "-");
    assert_eq!(tree.children()[4].values(), vec!["c"]);
    assert_eq!(parser.cursor().position(), 5);
}

#[test]
fn test_skip_expression() {
    let tokens = vec![Token::keyword("skip"), Token::symbol("+")];

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_expression().unwrap();

    assert_eq!(tree.len(), 1);
    assert!(tree.children()[0].is_leaf_of(&Token::keyword("skip")));
    assert_eq!(parser.cursor().position(), 1);
}

#[test]
fn test_missing_term() {
    let tokens = vec![Token::symbol("+"), Token::symbol(";")];

    let err = Parser::new(&tokens).parse_expression().unwrap_err();
    assert_eq!(err.position, 0);
    assert_eq!(
        err.reason,
        ParseFailure::UnexpectedToken {
            expected: Expectation::Production(Production::Term),
            found: Token::symbol("+"),
        }
    );
}

#[test]
fn test_terms() {
    // Unary operator and nested term
    let tokens = token_list(
        "
        unaryOp -
        integerConstant 7
        symbol ;
        ",
    );
    let tree = Parser::new(&tokens).parse_term().unwrap();
    assert_eq!(tree.labels(), vec!["unaryOp", "term"]);
    assert_eq!(tree.children()[1].values(), vec!["7"]);

    // Indexed variable
    let tokens = token_list(
        "
        identifier items
        symbol [
        integerConstant 1
        symbol ]
        symbol ;
        ",
    );
    let tree = Parser::new(&tokens).parse_term().unwrap();
    assert_eq!(
        tree.labels(),
        vec!["identifier", "symbol", "expression", "symbol"]
    );

    // Constants keep their kind
    let tokens = token_list(
        "
        stringConstant two words
        symbol ;
        ",
    );
    let tree = Parser::new(&tokens).parse_term().unwrap();
    assert_eq!(tree.child(0), Some(&ParseTree::new("stringConstant", "two words")));
}

#[test]
fn test_subroutine_call_is_unsupported() {
    let text = fs::read_to_string(Path::new("demos/greeting.tokens"))
        .expect("Failed to read demo file");
    let tokens = read_token_list(&text).unwrap();

    let err = Parser::new(&tokens).parse_class().unwrap_err();
    assert_eq!(
        err.reason,
        ParseFailure::UnsupportedProduction {
            production: Production::ExpressionList
        }
    );
    assert_eq!(err.position, 14);
}

#[test]
fn test_let_is_unsupported() {
    let tokens = token_list(
        "
        keyword let
        identifier x
        symbol =
        integerConstant 1
        symbol ;
        ",
    );

    let err = Parser::new(&tokens).parse_statements().unwrap_err();
    assert_eq!(err.position, 0);
    assert_eq!(
        err.reason,
        ParseFailure::UnsupportedProduction {
            production: Production::Let
        }
    );
}

#[test]
fn test_statements() {
    let tokens = token_list(
        "
        keyword if
        identifier x
        symbol {
        keyword do
        keyword skip
        symbol ;
        symbol }
        keyword else
        symbol {
        symbol }
        keyword while
        keywordConstant true
        symbol {
        symbol }
        keyword return
        symbol ;
        symbol }
        ",
    );

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_statements().expect("Parsing failed");

    assert_eq!(
        tree.labels(),
        vec!["ifStatement", "whileStatement", "returnStatement"]
    );

    let if_statement = &tree.children()[0];
    assert_eq!(
        if_statement.labels(),
        vec![
            "keyword",
            "expression",
            "symbol",
            "statements",
            "symbol",
            "keyword",
            "symbol",
            "statements",
            "symbol"
        ]
    );
    assert_eq!(
        if_statement.children()[3].labels(),
        vec!["doStatement"]
    );
    assert_eq!(tree.children()[2].values(), vec!["return", ";"]);

    // Stops before the closing brace
    assert_eq!(parser.cursor().position(), tokens.len() - 1);
}

#[test]
fn test_return_with_value() {
    let tokens = token_list(
        "
        keyword return
        identifier x
        symbol ;
        ",
    );

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_return().unwrap();
    assert_eq!(tree.labels(), vec!["keyword", "expression", "symbol"]);
    assert!(parser.cursor().is_exhausted());
}

#[test]
fn test_nested_parentheses() {
    let tokens = nested_parens(20);

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_expression().expect("Parsing failed");

    // expression > term > ( expression ... ) per level, plus the innermost leaf
    assert_eq!(tree.depth(), 2 * 20 + 3);
    assert_eq!(parser.cursor().position(), tokens.len() - 1);
}

#[test]
fn test_nesting_limit() {
    let tokens = nested_parens(40);
    let options = ParseOptions::new().with_max_depth(64);

    let err = Parser::with_options(&tokens, options)
        .parse_expression()
        .unwrap_err();
    assert_eq!(err.reason, ParseFailure::NestingTooDeep { limit: 64 });
    // Each level costs an expression and a term
    assert_eq!(err.position, 32);

    let options = ParseOptions::new().with_max_depth(128);
    assert!(Parser::with_options(&tokens, options)
        .parse_expression()
        .is_ok());
}

#[test]
fn test_counter_demo() {
    let text = fs::read_to_string(Path::new("demos/counter.tokens"))
        .expect("Failed to read demo file");
    let tokens = read_token_list(&text).unwrap();

    let mut parser = Parser::new(&tokens);
    let tree = parser.parse_class().expect("Parsing failed");
    assert!(parser.cursor().is_exhausted());

    assert_eq!(
        tree.labels(),
        vec![
            "keyword",
            "identifier",
            "symbol",
            "classVarDec",
            "classVarDec",
            "subroutine",
            "symbol"
        ]
    );

    let subroutine = &tree.children()[5];
    assert_eq!(subroutine.children()[4].len(), 3 * 2 - 1);

    // The rendering reads back to the same tree
    let rendering = tree.to_string();
    let reread = ParseTree::from_rendering(&rendering).expect("Rendering should read back");
    assert_eq!(reread, tree);
}

#[test]
fn test_nesting_limit_has_a_ceiling() {
    let options = ParseOptions::new().with_max_depth(1_000_000);
    assert_eq!(options.max_depth, MAX_DEPTH_CEILING);

    // Deep input fails cleanly instead of exhausting the stack
    let tokens = nested_parens(2_000);
    let err = Parser::with_options(&tokens, options)
        .parse_expression()
        .unwrap_err();
    assert_eq!(
        err.reason,
        ParseFailure::NestingTooDeep {
            limit: MAX_DEPTH_CEILING
        }
    );

    // Setting the field directly is held to the same ceiling
    let mut options = ParseOptions::new();
    options.max_depth = usize::MAX;
    let err = Parser::with_options(&tokens, options)
        .parse_expression()
        .unwrap_err();
    assert_eq!(
        err.reason,
        ParseFailure::NestingTooDeep {
            limit: MAX_DEPTH_CEILING
        }
    );
}

#[test]
fn test_class_var_dec_requires_type() {
    let tokens = token_list(
        "
        keyword static
        symbol ;
        identifier a
        symbol ;
        ",
    );

    let err = Parser::new(&tokens).parse_class_var_dec().unwrap_err();
    assert_eq!(err.position, 1);
    assert_eq!(
        err.reason,
        ParseFailure::UnexpectedToken {
            expected: Expectation::TypeName,
            found: Token::symbol(";"),
        }
    );
}
