//! Production stack pane
//!
//! Shows the productions currently being parsed, innermost first, followed by
//! the event of the current step and how often each production was entered
//! over the whole parse.

use crate::parser::parse::Production;
use crate::snapshot::{ParseTrace, Snapshot, TraceEvent};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render the production stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    trace: &ParseTrace,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Productions ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let Some(snapshot) = snapshot else {
        let paragraph = Paragraph::new("(nothing recorded)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![section("Event")];
    lines.push(event_line(&snapshot.event));
    lines.push(Line::default());

    lines.push(section("Stack"));
    if snapshot.stack.is_empty() {
        lines.push(Line::styled(
            "(empty)",
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    for (depth, production) in snapshot.stack.iter().enumerate().rev() {
        let is_top = depth + 1 == snapshot.stack.len();
        let style = if is_top {
            Style::default()
                .fg(DEFAULT_THEME.production)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.muted_production)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:3} ", depth), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(production.name(), style),
        ]));
    }
    lines.push(Line::default());

    lines.push(section("Entered"));
    for production in Production::ALL {
        let count = trace.entries(production);
        if count == 0 {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<16}", production.name()),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
            Span::styled(count.to_string(), Style::default().fg(DEFAULT_THEME.number)),
        ]));
    }

    // Clamp scroll offset only if content exceeds visible area
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::styled(
        title,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )
}

fn event_line(event: &TraceEvent) -> Line<'static> {
    let label = |text: &'static str| {
        Span::styled(
            format!("{:<8}", text),
            Style::default().fg(DEFAULT_THEME.comment),
        )
    };

    match event {
        TraceEvent::Enter(production) => Line::from(vec![
            label("enter"),
            Span::styled(
                production.name(),
                Style::default().fg(DEFAULT_THEME.production),
            ),
        ]),
        TraceEvent::Consume(token) => Line::from(vec![
            label("consume"),
            Span::styled(
                token.to_string(),
                Style::default().fg(DEFAULT_THEME.token_color(token.kind)),
            ),
        ]),
        TraceEvent::Exit(production, tree) => Line::from(vec![
            label("exit"),
            Span::styled(
                format!("{} ({} nodes)", production.name(), tree.node_count()),
                Style::default().fg(DEFAULT_THEME.success),
            ),
        ]),
        TraceEvent::Fail(err) => Line::from(vec![
            label("fail"),
            Span::styled(err.reason.to_string(), Style::default().fg(DEFAULT_THEME.error)),
        ]),
    }
}
