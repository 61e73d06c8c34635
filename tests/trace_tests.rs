// Parse trace recording and history navigation

use descent::parser::options::ParseOptions;
use descent::parser::parse::{ParseFailure, Parser, Production};
use descent::parser::token::{read_token_list, Token};
use descent::snapshot::{HistoryError, ParseTrace, TraceEvent};
use std::fs;
use std::path::Path;

const LIMIT: usize = 16 * 1024 * 1024;

fn main_class() -> Vec<Token> {
    vec![
        Token::keyword("class"),
        Token::identifier("Main"),
        Token::symbol("{"),
        Token::symbol("}"),
    ]
}

fn events(trace: &ParseTrace) -> Vec<&TraceEvent> {
    trace.snapshots().iter().map(|s| &s.event).collect()
}

#[test]
fn test_tracing_is_off_by_default() {
    let tokens = main_class();
    let mut parser = Parser::new(&tokens);
    parser.parse_program().unwrap();
    assert!(parser.take_trace().is_none());
}

#[test]
fn test_program_trace() {
    let tokens = main_class();
    let options = ParseOptions::new().with_snapshot_limit(LIMIT);
    let mut parser = Parser::with_options(&tokens, options);
    let tree = parser.parse_program().unwrap();
    let trace = parser.take_trace().expect("Trace should be recorded");

    let events = events(&trace);
    assert_eq!(events.len(), 1 + tokens.len() + 1);
    assert_eq!(events[0], &TraceEvent::Enter(Production::Program));
    for (event, token) in events[1..=4].iter().zip(&tokens) {
        assert_eq!(*event, &TraceEvent::Consume(token.clone()));
    }
    assert_eq!(
        events[5],
        &TraceEvent::Exit(Production::Program, tree.clone())
    );

    // Positions are taken before each event
    let positions: Vec<usize> = trace.snapshots().iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 0, 1, 2, 3, 4]);

    for snapshot in trace.snapshots().iter() {
        assert_eq!(snapshot.stack, vec![Production::Program]);
    }
    assert_eq!(trace.entries(Production::Program), 1);
    assert!(!trace.is_truncated());
}

#[test]
fn test_consumed_tokens_match_cursor() {
    let text = fs::read_to_string(Path::new("demos/counter.tokens"))
        .expect("Failed to read demo file");
    let tokens = read_token_list(&text).unwrap();

    let options = ParseOptions::new().with_snapshot_limit(LIMIT);
    let mut parser = Parser::with_options(&tokens, options);
    parser.parse_class().expect("Parsing failed");
    let trace = parser.take_trace().unwrap();

    let consumed = events(&trace)
        .into_iter()
        .filter(|e| matches!(e, TraceEvent::Consume(_)))
        .count();
    assert_eq!(consumed, tokens.len());
    assert_eq!(consumed, parser.cursor().position());

    assert_eq!(trace.entries(Production::Class), 1);
    assert_eq!(trace.entries(Production::ClassVarDec), 2);
    assert_eq!(trace.entries(Production::Subroutine), 1);
    assert_eq!(trace.entries(Production::Let), 0);

    // Every entered production is exited on success
    let entered = events(&trace)
        .into_iter()
        .filter(|e| matches!(e, TraceEvent::Enter(_)))
        .count();
    let exited = events(&trace)
        .into_iter()
        .filter(|e| matches!(e, TraceEvent::Exit(..)))
        .count();
    assert_eq!(entered, exited);
}

#[test]
fn test_failure_is_recorded_once() {
    let tokens = vec![
        Token::keyword("class"),
        Token::identifier("Main"),
        Token::symbol("{"),
        Token::keyword("field"),
        Token::keyword("int"),
    ];

    let options = ParseOptions::new().with_snapshot_limit(LIMIT);
    let mut parser = Parser::with_options(&tokens, options);
    let err = parser.parse_class().unwrap_err();
    assert_eq!(err.reason, ParseFailure::OutOfTokens);

    let history = parser.take_trace().unwrap().into_history();
    let failures = history
        .trace()
        .snapshots()
        .iter()
        .filter(|s| matches!(s.event, TraceEvent::Fail(_)))
        .count();
    assert_eq!(failures, 1);
    assert_eq!(history.failure(), Some(&err));

    let last = history.trace().snapshots().iter().last().unwrap();
    assert_eq!(last.event, TraceEvent::Fail(err.clone()));
    assert!(last.stack.is_empty());
}

#[test]
fn test_nesting_failure_is_recorded() {
    let tokens = vec![
        Token::symbol("("),
        Token::symbol("("),
        Token::identifier("x"),
        Token::symbol(")"),
        Token::symbol(")"),
        Token::symbol(";"),
    ];

    let options = ParseOptions::new()
        .with_max_depth(3)
        .with_snapshot_limit(LIMIT);
    let mut parser = Parser::with_options(&tokens, options);
    let err = parser.parse_expression().unwrap_err();
    assert_eq!(err.reason, ParseFailure::NestingTooDeep { limit: 3 });

    let history = parser.take_trace().unwrap().into_history();
    assert_eq!(history.failure(), Some(&err));
    assert_eq!(history.trace().entries(Production::Expression), 2);
    assert_eq!(history.trace().entries(Production::Term), 1);
}

#[test]
fn test_truncation_keeps_result() {
    let text = fs::read_to_string(Path::new("demos/counter.tokens"))
        .expect("Failed to read demo file");
    let tokens = read_token_list(&text).unwrap();

    let untraced = Parser::new(&tokens).parse_class().unwrap();

    let options = ParseOptions::new().with_snapshot_limit(1024);
    let mut parser = Parser::with_options(&tokens, options);
    let traced = parser.parse_class().unwrap();
    assert_eq!(traced, untraced);

    let trace = parser.take_trace().unwrap();
    assert!(trace.is_truncated());
    assert!(trace.snapshots().memory_usage() <= 1024);
    // Counters keep going after the snapshots stop
    assert_eq!(trace.entries(Production::Subroutine), 1);
}

#[test]
fn test_history_navigation() {
    let tokens = main_class();
    let options = ParseOptions::new().with_snapshot_limit(LIMIT);
    let mut parser = Parser::with_options(&tokens, options);
    let tree = parser.parse_program().unwrap();
    let mut history = parser.take_trace().unwrap().into_history();

    assert_eq!(history.total_snapshots(), 6);
    assert_eq!(history.history_position(), 0);
    assert_eq!(history.step_backward(), Err(HistoryError::AtStart));
    assert!(history.latest_subtree().is_none());

    history.step_forward().unwrap();
    assert_eq!(history.current().map(|s| s.position), Some(0));
    assert_eq!(
        history.current().map(|s| &s.event),
        Some(&TraceEvent::Consume(Token::keyword("class")))
    );

    history.jump_to_end();
    assert_eq!(history.history_position(), 5);
    assert_eq!(history.step_forward(), Err(HistoryError::AtEnd));
    assert_eq!(history.latest_subtree(), Some((Production::Program, &tree)));
    assert!(history.failure().is_none());

    history.step_backward().unwrap();
    assert!(history.latest_subtree().is_none());

    history.rewind_to_start();
    assert_eq!(history.history_position(), 0);
}
