use openfield_model::Metric;
use ratatui::{
    prelude::{Buffer, Rect},
    symbols::merge::MergeStrategy,
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::style;

/// Multi-line text box for pasting a column of numbers.
#[derive(Debug)]
pub struct BatchInput<'a> {
    text: &'a str,
    group_name: &'a str,
    metric: Metric,
    focused: bool,
}

impl<'a> BatchInput<'a> {
    pub fn new(text: &'a str, group_name: &'a str, metric: Metric) -> Self {
        Self {
            text,
            group_name,
            metric,
            focused: false,
        }
    }

    pub fn focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

impl Widget for BatchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title(format!("Batch input: {} / {}", self.group_name, self.metric))
            .title_bottom(Line::styled("^F fill column  ^A append rows", style::HINT).right_aligned())
            .border_style(style::border(self.focused))
            .merge_borders(MergeStrategy::Exact);

        let text = if self.text.is_empty() && !self.focused {
            Text::styled("Paste numbers separated by newlines, commas or spaces", style::HINT)
        } else if self.focused {
            Text::raw(format!("{}▏", self.text))
        } else {
            Text::raw(self.text)
        };

        // keep the end of long input visible, counting rows after wrapping
        let inner = block.inner(area);
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let overflow = u16::try_from(paragraph.line_count(inner.width))
            .unwrap_or(u16::MAX)
            .saturating_sub(inner.height);

        paragraph
            .block(block)
            .scroll((overflow, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_long_single_line_scrolls_to_tail() {
        let text = (1..=30).map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        let area = Rect::new(0, 0, 22, 5);
        let mut buf = Buffer::empty(area);
        BatchInput::new(&text, "Control", Metric::TotalDistance)
            .focused(true)
            .render(area, &mut buf);

        let rows = rows(&buf);
        assert!(rows.iter().any(|row| row.contains("30▏")), "{rows:#?}");
        assert!(!rows.iter().any(|row| row.contains("1, 2, 3")), "{rows:#?}");
    }

    #[test]
    fn test_short_input_is_not_scrolled() {
        let area = Rect::new(0, 0, 22, 5);
        let mut buf = Buffer::empty(area);
        BatchInput::new("1, 2", "Control", Metric::TotalDistance)
            .focused(true)
            .render(area, &mut buf);

        assert!(rows(&buf)[1].contains("1, 2▏"));
    }
}
