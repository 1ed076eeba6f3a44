//! Tree pane rendering
//!
//! Draws the flattened display tree: one line per row, indented by depth, with
//! expand/collapse markers and the selected line highlighted. The header title
//! and the node count footer go on the pane border.

use super::utils::{
    clamp_offset, follow, format_marker, format_summary_styled, inner_height, TreeLine,
};
use crate::inspector::View;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the tree pane
pub struct TreeScrollState {
    pub offset: usize,
}

/// Data needed to render the tree pane
pub struct TreeRenderData<'a> {
    pub view: &'a View,
    pub lines: &'a [TreeLine],
    pub selected: usize,
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    data: TreeRenderData,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(title) = &data.view.title {
        let title = if data.view.minimized {
            format!(" {} (minimized) ", title)
        } else {
            format!(" {} ", title)
        };
        block = block.title(title);
    }
    if let Some(footer) = data.view.footer() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", footer),
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }

    if data.view.root.is_none() {
        let paragraph = Paragraph::new("(minimized, press m to expand)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let all_items: Vec<ListItem> = data
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut spans = vec![
                Span::raw("  ".repeat(line.depth)),
                Span::styled(
                    format_marker(line),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            match &line.key {
                Some(key) => spans.push(Span::styled(
                    key.clone(),
                    Style::default().fg(DEFAULT_THEME.key),
                )),
                None => spans.push(Span::styled("•", Style::default().fg(DEFAULT_THEME.comment))),
            }
            if let Some(summary) = &line.summary {
                spans.push(Span::styled(": ", Style::default().fg(DEFAULT_THEME.fg)));
                spans.extend(format_summary_styled(summary));
            }

            let item = ListItem::new(Line::from(spans));
            if i == data.selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    // Keep the selected line visible
    let visible_height = inner_height(area);
    scroll_state.offset = follow(scroll_state.offset, data.selected, visible_height);
    scroll_state.offset = clamp_offset(scroll_state.offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
