use openfield_report::AnalysisReport;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::style;

const HEADING: Style = Style::new().add_modifier(Modifier::BOLD);

/// The generated Markdown report, with light styling for headings and tables.
#[derive(Debug)]
pub struct ReportView<'a> {
    report: &'a AnalysisReport,
    scroll: u16,
    focused: bool,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self {
            report,
            scroll: 0,
            focused: false,
        }
    }

    pub fn scroll(self, scroll: u16) -> Self {
        Self { scroll, ..self }
    }

    pub fn focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

fn markdown_line(line: &str) -> Line<'_> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        Line::styled(trimmed.trim_start_matches('#').trim_start(), style::HEADER)
    } else if trimmed.starts_with("**") && trimmed.ends_with("**") && trimmed.len() > 4 {
        Line::styled(trimmed.trim_matches('*'), HEADING)
    } else if trimmed.starts_with('|') {
        Line::styled(line, Style::new().fg(Color::Gray))
    } else {
        Line::raw(line)
    }
}

impl Widget for ReportView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let title = if self.report.loading {
            Line::from(vec![
                "AI Report ".into(),
                Span::styled("(generating...)", style::HIGHLIGHT),
            ])
        } else {
            Line::from("AI Report")
        };
        let mut block = Block::bordered()
            .title(title)
            .border_style(style::border(self.focused))
            .merge_borders(MergeStrategy::Exact);
        if let Some(timestamp) = self.report.timestamp {
            block = block.title_bottom(
                Line::styled(
                    format!("generated {}", timestamp.format("%Y-%m-%d %H:%M:%S")),
                    style::HINT,
                )
                .right_aligned(),
            );
        }

        let text = if self.report.markdown.is_empty() {
            let hint = if self.report.loading {
                "Analyzing the current data..."
            } else {
                "Press g to generate a report from the current data."
            };
            Text::styled(hint, style::HINT)
        } else {
            self.report.markdown.lines().map(markdown_line).collect()
        };

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_markers_are_stripped() {
        let line = markdown_line("### 1. Descriptive statistics");
        assert_eq!(line.to_string(), "1. Descriptive statistics");
        assert_eq!(line.style, style::HEADER);

        assert_eq!(markdown_line("**Bold**").to_string(), "Bold");
        assert_eq!(markdown_line("plain text").to_string(), "plain text");
    }
}
