use openfield_model::Group;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

use super::style;

/// Group names with their color swatch and sample size.
#[derive(Debug)]
pub struct GroupList<'a> {
    groups: &'a [Group],
    active: usize,
    focused: bool,
}

impl<'a> GroupList<'a> {
    pub fn new(groups: &'a [Group], active: usize) -> Self {
        Self {
            groups,
            active,
            focused: false,
        }
    }

    pub fn focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

impl Widget for GroupList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = self
            .groups
            .iter()
            .map(|group| {
                ListItem::new(Line::from(vec![
                    Span::styled("■ ", Style::new().fg(style::group_color(group.color()))),
                    Span::raw(group.name.as_str()),
                    Span::styled(format!("  n={}", group.len()), style::HINT),
                ]))
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .title("Groups")
                    .border_style(style::border(self.focused))
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(style::HIGHLIGHT)
            .highlight_symbol(">> ");

        let mut state = ListState::default().with_selected(Some(self.active));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
