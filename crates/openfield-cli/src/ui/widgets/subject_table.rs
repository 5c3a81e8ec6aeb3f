use openfield_model::{Group, Metric};
use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use super::style;

/// In-progress text of a single cell edit.
#[derive(Debug, Clone, Copy)]
pub struct CellEdit<'a> {
    pub subject: usize,
    pub metric: Metric,
    pub text: &'a str,
}

/// Subjects of one group, one column per metric.
///
/// The target metric column is highlighted; it is where batch input and
/// column clears apply.
#[derive(Debug)]
pub struct SubjectTable<'a> {
    group: Option<&'a Group>,
    target_metric: Metric,
    selected: Option<usize>,
    editing: Option<CellEdit<'a>>,
    focused: bool,
}

impl<'a> SubjectTable<'a> {
    pub fn new(group: Option<&'a Group>, target_metric: Metric) -> Self {
        Self {
            group,
            target_metric,
            selected: None,
            editing: None,
            focused: false,
        }
    }

    pub fn selected(self, selected: Option<usize>) -> Self {
        Self { selected, ..self }
    }

    pub fn editing(self, editing: Option<CellEdit<'a>>) -> Self {
        Self { editing, ..self }
    }

    pub fn focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }

    fn cell(&self, row: usize, metric: Metric, value: f64) -> Cell<'a> {
        match self.editing {
            Some(edit) if edit.subject == row && edit.metric == metric => {
                Cell::from(format!("{}▏", edit.text))
                    .style(style::FOCUSED_BORDER.add_modifier(Modifier::REVERSED))
            }
            _ => Cell::from(value.to_string()),
        }
    }
}

impl Widget for SubjectTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let header = std::iter::once(Cell::from("#"))
            .chain(Metric::ALL.iter().map(|&metric| {
                let cell = Cell::from(metric.short_label());
                if metric == self.target_metric {
                    cell.style(style::HIGHLIGHT)
                } else {
                    cell
                }
            }))
            .collect::<Row>()
            .style(style::HEADER);

        let rows = self
            .group
            .map(|group| {
                group
                    .subjects
                    .iter()
                    .enumerate()
                    .map(|(i, subject)| {
                        std::iter::once(Cell::from((i + 1).to_string()))
                            .chain(
                                subject
                                    .values
                                    .iter()
                                    .map(|(metric, value)| self.cell(i, metric, value)),
                            )
                            .collect::<Row>()
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let title = match self.group {
            Some(group) => Line::from(format!("Subjects: {}", group.name)),
            None => Line::from("Subjects"),
        };
        let widths = std::iter::once(Constraint::Length(4))
            .chain([Constraint::Fill(1); Metric::COUNT])
            .collect::<Vec<_>>();

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(style::border(self.focused))
                    .merge_borders(MergeStrategy::Exact),
            )
            .row_highlight_style(Style::new().add_modifier(Modifier::BOLD))
            .column_highlight_style(Style::new().fg(Color::Yellow))
            .highlight_symbol(">");

        let mut state = TableState::default()
            .with_selected(self.selected)
            .with_selected_column(Some(self.target_metric.index() + 1));
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
