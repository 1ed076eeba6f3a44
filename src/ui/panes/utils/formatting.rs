use super::lines::{Summary, SummaryBody, TreeLine};
use crate::inspector::tree::CIRCULAR_LABEL;
use crate::inspector::Category;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Color of a leaf value by category
fn leaf_color(category: Category) -> Color {
    match category {
        Category::Number | Category::BigInt => DEFAULT_THEME.number,
        Category::String(_) => DEFAULT_THEME.string,
        Category::Boolean => DEFAULT_THEME.keyword,
        Category::Null | Category::Undefined => DEFAULT_THEME.comment,
        Category::Function | Category::MathLike => DEFAULT_THEME.function,
        _ => DEFAULT_THEME.fg,
    }
}

/// Format a node summary with styled spans
pub(crate) fn format_summary_styled(summary: &Summary) -> Vec<Span<'static>> {
    match &summary.body {
        SummaryBody::Leaf(text) => {
            let text = match summary.category {
                Category::String(_) => format!("\"{}\"", text),
                _ => text.clone(),
            };
            let mut style = Style::default().fg(leaf_color(summary.category));
            if matches!(summary.category, Category::Null | Category::Undefined) {
                style = style.add_modifier(Modifier::ITALIC);
            }
            vec![Span::styled(text, style)]
        }
        SummaryBody::Empty(label) => {
            let mut spans = label_spans(label.as_deref(), summary.category);
            let marker = match summary.category {
                Category::String(_) => "\"\"",
                Category::Array => "[]",
                _ => "{}",
            };
            spans.push(Span::styled(
                marker,
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::DIM),
            ));
            spans
        }
        SummaryBody::Circular => vec![Span::styled(
            CIRCULAR_LABEL,
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )],
        SummaryBody::Labeled(label, text) => {
            let mut spans = label_spans(Some(label), summary.category);
            if let Some(text) = text {
                spans.push(Span::styled(
                    text.clone(),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ));
            }
            if summary.dump.is_some() {
                spans.push(Span::styled(
                    " ⇲",
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            spans
        }
        SummaryBody::Table(label, rows) => {
            let mut spans = label_spans(label.as_deref(), summary.category);
            let count = match summary.category {
                Category::Array => format!("[{}]", rows),
                _ => format!("{{{}}}", rows),
            };
            spans.push(Span::styled(count, Style::default().fg(DEFAULT_THEME.comment)));
            spans
        }
    }
}

fn label_spans(label: Option<&str>, category: Category) -> Vec<Span<'static>> {
    match label {
        Some(label) => {
            let color = match category {
                Category::Function | Category::MathLike => DEFAULT_THEME.function,
                _ => DEFAULT_THEME.type_name,
            };
            vec![Span::styled(format!("{} ", label), Style::default().fg(color))]
        }
        None => Vec::new(),
    }
}

/// Expand/collapse marker in front of a key
pub(crate) fn format_marker(line: &TreeLine) -> &'static str {
    if line.collapsed {
        "▸ "
    } else if line.has_children() {
        "▾ "
    } else {
        "  "
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::classify::StringKind;

    fn line_text(line: &TreeLine) -> String {
        let mut text = "  ".repeat(line.depth);
        text.push_str(format_marker(line));
        text.push_str(line.key.as_deref().unwrap_or("•"));
        if let Some(summary) = &line.summary {
            text.push_str(": ");
            for span in format_summary_styled(summary) {
                text.push_str(&span.content);
            }
        }
        text
    }

    fn line(summary: Option<Summary>, collapsed: bool) -> TreeLine {
        TreeLine {
            depth: 1,
            key: Some("k".to_string()),
            path: Some("$.k".to_string()),
            collapsed,
            summary,
        }
    }

    fn summary(category: Category, body: SummaryBody) -> Summary {
        Summary {
            path: "$.k".to_string(),
            category,
            body,
            dump: None,
        }
    }

    #[test]
    fn test_line_text() {
        let s = summary(
            Category::String(StringKind::NonEmpty),
            SummaryBody::Leaf("hi".to_string()),
        );
        assert_eq!(line_text(&line(Some(s), false)), "    k: \"hi\"");
        assert_eq!(line_text(&line(None, true)), "  ▸ k");

        let map = summary(Category::Map, SummaryBody::Table(Some("Map".to_string()), 2));
        assert_eq!(line_text(&line(Some(map), false)), "  ▾ k: Map {2}");

        let set = summary(Category::Set, SummaryBody::Empty(Some("Set".to_string())));
        assert_eq!(line_text(&line(Some(set), false)), "    k: Set {}");
    }
}
