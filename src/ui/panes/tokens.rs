//! Token stream pane
//!
//! Lists every input token with its index. Consumed tokens are dimmed, the
//! token under the cursor is highlighted and kept at a fixed row while
//! stepping. When the parse failed at this step the cursor row turns red.

use crate::parser::token::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the token pane
pub struct TokenScrollState {
    pub offset: usize,
    pub target_row: Option<usize>,
}

impl TokenScrollState {
    pub fn new() -> Self {
        TokenScrollState {
            offset: 0,
            target_row: None,
        }
    }
}

impl Default for TokenScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the token stream pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    position: usize,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut TokenScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Tokens ({}/{}) ", position.min(tokens.len()), tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    // One extra row for the end-of-input marker
    let total_rows = tokens.len() + 1;
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if scroll_state.target_row.is_none() {
        scroll_state.target_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_row = Some(target_row);

    // Keep the cursor row at the target visual row
    scroll_state.offset = position.saturating_sub(target_row);
    if total_rows > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_rows - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let lines: Vec<Line> = (0..total_rows)
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|idx| token_line(tokens.get(idx), idx, position, is_error))
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn token_line(token: Option<&Token>, idx: usize, position: usize, is_error: bool) -> Line<'static> {
    let is_current = idx == position;
    let is_consumed = idx < position;

    let marker = if is_current { "▶" } else { " " };
    let num_style = if is_current {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let mut spans = vec![Span::styled(format!("{}{:4} ", marker, idx), num_style)];

    match token {
        Some(token) => {
            let (kind_style, value_style) = if is_consumed {
                let dim = Style::default().fg(DEFAULT_THEME.comment);
                (dim, dim)
            } else {
                (
                    Style::default().fg(DEFAULT_THEME.comment),
                    Style::default().fg(DEFAULT_THEME.token_color(token.kind)),
                )
            };
            spans.push(Span::styled(format!("{:<16}", token.kind.tag()), kind_style));
            spans.push(Span::styled(token.value.clone(), value_style));
        }
        None => {
            spans.push(Span::styled(
                "(end of tokens)",
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
    }

    if is_current {
        let line_style = if is_error {
            Style::default()
                .bg(DEFAULT_THEME.error)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(DEFAULT_THEME.current_line_bg)
        };
        for span in &mut spans {
            span.style = span.style.patch(line_style);
        }
    }

    Line::from(spans)
}
