pub use self::{
    batch_input::*, dialog::*, group_list::*, key_binding_display::*, metric_chart::*,
    report_view::*, subject_table::*,
};

mod batch_input;
mod dialog;
mod group_list;
mod key_binding_display;
mod metric_chart;
mod report_view;
mod subject_table;

pub mod style {
    use openfield_model::GroupColor;
    use ratatui::style::{Color, Modifier, Style};

    pub const FOCUSED_BORDER: Style = Style::new().fg(Color::Yellow);
    pub const BORDER: Style = Style::new().fg(Color::Gray);
    pub const HIGHLIGHT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    pub const HINT: Style = Style::new().fg(Color::DarkGray);
    pub const ERROR: Style = Style::new().fg(Color::Red);
    pub const HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    #[must_use]
    pub const fn border(focused: bool) -> Style {
        if focused { FOCUSED_BORDER } else { BORDER }
    }

    #[must_use]
    pub const fn group_color(color: GroupColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }
}
