use openfield_model::{Group, Metric};
use ratatui::{
    layout::Direction,
    prelude::{Buffer, Rect},
    style::{Color, Style},
    symbols::merge::MergeStrategy,
    widgets::{Bar, BarChart, Block, Widget},
};

use super::style;

/// Group means of one metric as horizontal bars labelled with mean ± SEM.
#[derive(Debug)]
pub struct MetricChart<'a> {
    metric: Metric,
    groups: &'a [Group],
    targeted: bool,
}

impl<'a> MetricChart<'a> {
    pub fn new(metric: Metric, groups: &'a [Group]) -> Self {
        Self {
            metric,
            groups,
            targeted: false,
        }
    }

    pub fn targeted(self, targeted: bool) -> Self {
        Self { targeted, ..self }
    }
}

/// Bar lengths are integral; scale so fractional means still compare.
const BAR_SCALE: f64 = 100.0;

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(mean: f64) -> u64 {
    (mean.max(0.0) * BAR_SCALE).round() as u64
}

impl Widget for MetricChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let bars = self
            .groups
            .iter()
            .map(|group| {
                let stats = group.stats(self.metric);
                let color = style::group_color(group.color());
                Bar::with_label(group.name.as_str(), bar_value(stats.mean))
                    .text_value(format!("{stats:.1}"))
                    .style(Style::new().fg(color))
                    .value_style(Style::new().fg(Color::Black).bg(color))
            })
            .collect::<Vec<_>>();

        BarChart::new(bars)
            .block(
                Block::bordered()
                    .title(self.metric.label())
                    .border_style(style::border(self.targeted))
                    .merge_borders(MergeStrategy::Exact),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .render(area, buf);
    }
}
