//! Parse tree pane rendering

use crate::parser::parse::Production;
use crate::parser::token::TokenKind;
use crate::parser::tree::ParseTree;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the most recently completed subtree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    subtree: Option<(Production, &ParseTree)>,
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

    let title = match subtree {
        Some((production, _)) => format!(" Parse Tree: {} ", production.name()),
        None => " Parse Tree ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some((_, tree)) = subtree else {
        let paragraph = Paragraph::new("(no production finished yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = tree.iter().map(|(depth, node)| node_item(depth, node)).collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn node_item(depth: usize, node: &ParseTree) -> ListItem<'static> {
    let indent = Span::raw("  ".repeat(depth));

    // Leaves carry a token kind as their label
    let line = match node.label().parse::<TokenKind>() {
        Ok(kind) if node.is_empty() => Line::from(vec![
            indent,
            Span::styled(
                format!("{} ", node.label()),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(
                node.value().to_string(),
                Style::default().fg(DEFAULT_THEME.token_color(kind)),
            ),
        ]),
        _ => Line::from(vec![
            indent,
            Span::styled(
                node.label().to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.production)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    };

    ListItem::new(line)
}
