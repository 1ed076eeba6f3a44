//! Console pane: the diagnostic channel
//!
//! Configuration problems are shown with an error marker, dumps as plain info
//! lines. The pane keeps the newest lines reachable: asking for an offset past
//! the end scrolls to the bottom.

use super::utils::{clamp_offset, inner_height};
use crate::inspector::diagnostics::{Console, ConsoleLevel, ConsoleLine};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

fn console_line(line: ConsoleLine) -> Line<'static> {
    let (marker, color) = match line.level {
        ConsoleLevel::Error => ("! ", DEFAULT_THEME.error),
        ConsoleLevel::Info => ("  ", DEFAULT_THEME.fg),
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(line.text, Style::default().fg(color)),
    ])
}

/// Render the console pane
pub fn render_console_pane(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
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

    let output = console.get_output();
    let block = Block::default()
        .title(format!(" Console ({}) ", output.len()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    if output.is_empty() {
        *scroll_offset = 0;
        let paragraph = Paragraph::new("(no diagnostics)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = inner_height(area);
    *scroll_offset = clamp_offset(*scroll_offset, output.len(), visible);

    let lines: Vec<Line> = output
        .into_iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(console_line)
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
