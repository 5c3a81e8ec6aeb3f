use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

use super::style;

const DIALOG_WIDTH: u16 = 60;

fn popup_area(area: Rect, height: u16) -> Rect {
    area.centered(
        Constraint::Length(DIALOG_WIDTH.min(area.width)),
        Constraint::Length(height.min(area.height)),
    )
}

/// Yes/no popup shown before a destructive clear.
#[derive(Debug)]
pub struct ConfirmDialog<'a> {
    prompt: &'a str,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self { prompt }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let area = popup_area(area, 6);
        let block = Block::bordered()
            .title("Confirm")
            .border_style(Style::new().fg(Color::Red));
        let text = Text::from(vec![
            Line::raw(self.prompt),
            Line::raw(""),
            Line::styled("y/Enter: Confirm | n/Esc: Cancel", style::HINT).centered(),
        ]);

        Clear.render(area, buf);
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Single-line text entry popup.
#[derive(Debug)]
pub struct TextPromptDialog<'a> {
    title: &'a str,
    text: &'a str,
}

impl<'a> TextPromptDialog<'a> {
    pub fn new(title: &'a str, text: &'a str) -> Self {
        Self { title, text }
    }
}

impl Widget for TextPromptDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let area = popup_area(area, 4);
        let block = Block::bordered()
            .title(self.title)
            .title_bottom(Line::styled("Enter: Save | Esc: Cancel", style::HINT).right_aligned())
            .border_style(style::FOCUSED_BORDER);

        Clear.render(area, buf);
        Paragraph::new(format!("{}▏", self.text))
            .block(block)
            .render(area, buf);
    }
}
