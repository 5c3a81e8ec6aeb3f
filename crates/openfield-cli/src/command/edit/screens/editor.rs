use std::{fmt, sync::Arc};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use openfield_model::{
    Acknowledgement, BatchMode, EditError, Editor, Metric, PendingConfirmation,
};
use openfield_report::{DEFAULT_METRICS, ReportGenerator, ReportState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Spacing},
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::widgets::{
    BatchInput, CellEdit, ConfirmDialog, GroupList, KeyBinding, KeyBindingDisplay, MetricChart,
    ReportView, SubjectTable, TextPromptDialog, style,
};

/// Metrics plotted in the chart grid, row by row.
const CHART_METRICS: [Metric; 4] = [
    Metric::TotalDistance,
    Metric::CenterTime,
    Metric::Velocity,
    Metric::Rearing,
];

const REPORT_PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
enum Focus {
    #[default]
    Groups,
    Subjects,
    Input,
    Report,
}

impl Focus {
    const ORDER: [Self; 4] = [Self::Groups, Self::Subjects, Self::Input, Self::Report];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Default)]
enum Mode {
    #[default]
    Normal,
    RenameGroup {
        buffer: String,
    },
    EditCell {
        subject: usize,
        metric: Metric,
        buffer: String,
    },
    Confirm(PendingConfirmation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    text: String,
    is_error: bool,
}

enum TextKey {
    Submit,
    Cancel,
    Edited,
}

/// Applies a key to a single-line text buffer.
fn edit_text(buffer: &mut String, key: KeyEvent) -> TextKey {
    match key.code {
        KeyCode::Enter => TextKey::Submit,
        KeyCode::Esc => TextKey::Cancel,
        KeyCode::Backspace => {
            buffer.pop();
            TextKey::Edited
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            TextKey::Edited
        }
        _ => TextKey::Edited,
    }
}

/// Wraps `index` one step up or down within `0..len`.
fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        index.checked_sub(1).unwrap_or(len - 1)
    }
}

/// The interactive dataset editor: group list, subject table, batch input,
/// per-metric charts and the report pane.
pub struct EditorScreen {
    editor: Editor,
    report: ReportState,
    generator: Arc<dyn ReportGenerator>,
    focus: Focus,
    mode: Mode,
    selected_subject: usize,
    report_scroll: u16,
    status: Option<StatusMessage>,
    should_exit: bool,
}

impl fmt::Debug for EditorScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorScreen")
            .field("editor", &self.editor)
            .field("report", &self.report)
            .field("focus", &self.focus)
            .field("mode", &self.mode)
            .field("selected_subject", &self.selected_subject)
            .finish_non_exhaustive()
    }
}

impl EditorScreen {
    #[must_use]
    pub fn new(editor: Editor, generator: Arc<dyn ReportGenerator>) -> Self {
        Self {
            editor,
            report: ReportState::new(),
            generator,
            focus: Focus::default(),
            mode: Mode::default(),
            selected_subject: 0,
            report_scroll: 0,
            status: None,
            should_exit: false,
        }
    }

    pub(crate) fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Collects a finished report, if any.
    pub(crate) fn update(&mut self) {
        if self.report.poll() {
            self.report_scroll = 0;
            self.info("Report updated");
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    fn report_edit(&mut self, result: Result<(), EditError>, done: impl Into<String>) {
        match result {
            Ok(()) => self.info(done),
            Err(err) => self.error(err.to_string()),
        }
    }

    fn active_len(&self) -> usize {
        self.editor.active_group().map_or(0, |group| group.len())
    }

    fn clamp_selected_subject(&mut self) {
        self.selected_subject = self
            .selected_subject
            .min(self.active_len().saturating_sub(1));
    }

    pub(crate) fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event() {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        } else if let Event::Paste(text) = event {
            self.handle_paste(text);
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match &mut self.mode {
            Mode::Normal => {
                self.focus = Focus::Input;
                self.editor.input_buffer_mut().push_str(text);
            }
            Mode::RenameGroup { buffer } | Mode::EditCell { buffer, .. } => {
                buffer.push_str(text.trim());
            }
            Mode::Confirm(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match std::mem::take(&mut self.mode) {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Confirm(pending) => self.handle_confirm_key(pending, key),
            Mode::RenameGroup { mut buffer } => match edit_text(&mut buffer, key) {
                TextKey::Submit => {
                    let index = self.editor.active_group_index();
                    let result = self.editor.rename_group(index, buffer.trim());
                    self.report_edit(result, "Group renamed");
                }
                TextKey::Cancel => {}
                TextKey::Edited => self.mode = Mode::RenameGroup { buffer },
            },
            Mode::EditCell {
                subject,
                metric,
                mut buffer,
            } => match edit_text(&mut buffer, key) {
                TextKey::Submit => match self.editor.set_single_value(subject, metric, &buffer) {
                    Ok(true) => self.info(format!("Subject {} {metric} set", subject + 1)),
                    Ok(false) => self.error(format!("Not a number: {buffer:?}; edit discarded")),
                    Err(err) => self.error(err.to_string()),
                },
                TextKey::Cancel => {}
                TextKey::Edited => {
                    self.mode = Mode::EditCell {
                        subject,
                        metric,
                        buffer,
                    };
                }
            },
        }
    }

    fn handle_confirm_key(&mut self, pending: PendingConfirmation, key: KeyEvent) {
        let answer = match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Acknowledgement::Confirmed,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Acknowledgement::Declined,
            _ => {
                self.mode = Mode::Confirm(pending);
                return;
            }
        };
        match self.editor.confirm(pending, answer) {
            Ok(true) => {
                self.clamp_selected_subject();
                self.info("Cleared");
            }
            Ok(false) => self.info("Cancelled"),
            Err(err) => self.error(err.to_string()),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            KeyCode::F(5) => {
                self.start_report();
                return;
            }
            _ => {}
        }

        if self.focus.is_input() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('g') => self.start_report(),
            KeyCode::Char('[') => self.set_target_metric(self.editor.target_metric().prev()),
            KeyCode::Char(']') => self.set_target_metric(self.editor.target_metric().next()),
            _ => match self.focus {
                Focus::Groups => self.handle_groups_key(key),
                Focus::Subjects => self.handle_subjects_key(key),
                Focus::Report => self.handle_report_key(key),
                Focus::Input => {}
            },
        }
    }

    fn set_target_metric(&mut self, metric: Metric) {
        self.editor.set_target_metric(metric);
    }

    fn select_group(&mut self, index: usize) {
        if self.editor.select_group(index).is_ok() {
            self.selected_subject = 0;
        }
    }

    fn handle_groups_key(&mut self, key: KeyEvent) {
        let active = self.editor.active_group_index();
        let len = self.editor.dataset().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_group(step(active, len, false)),
            KeyCode::Down | KeyCode::Char('j') => self.select_group(step(active, len, true)),
            KeyCode::Enter => self.focus = Focus::Subjects,
            KeyCode::Char('a') => {
                self.editor.add_group();
                self.selected_subject = 0;
                let name = self
                    .editor
                    .active_group()
                    .map(|group| group.name.clone())
                    .unwrap_or_default();
                self.info(format!("Added {name}"));
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.editor.can_remove_group() {
                    let result = self.editor.remove_group(active);
                    self.selected_subject = 0;
                    self.report_edit(result, "Group removed");
                } else {
                    self.error("At least one group is required");
                }
            }
            KeyCode::Char('r') => {
                if let Some(group) = self.editor.active_group() {
                    self.mode = Mode::RenameGroup {
                        buffer: group.name.clone(),
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_subjects_key(&mut self, key: KeyEvent) {
        let len = self.active_len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_subject = step(self.selected_subject, len, false);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_subject = step(self.selected_subject, len, true);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.set_target_metric(self.editor.target_metric().prev());
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.set_target_metric(self.editor.target_metric().next());
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                let metric = self.editor.target_metric();
                let current = self
                    .editor
                    .active_group()
                    .and_then(|group| group.subjects.get(self.selected_subject))
                    .map(|subject| subject.value(metric));
                if let Some(value) = current {
                    self.mode = Mode::EditCell {
                        subject: self.selected_subject,
                        metric,
                        buffer: value.to_string(),
                    };
                }
            }
            KeyCode::Char('a') => {
                let result = self.editor.add_single_subject();
                self.selected_subject = self.active_len().saturating_sub(1);
                self.report_edit(result, "Subject added");
            }
            KeyCode::Char('x') | KeyCode::Delete if len > 0 => {
                let result = self.editor.delete_subject(self.selected_subject);
                self.clamp_selected_subject();
                self.report_edit(result, "Subject deleted");
            }
            KeyCode::Char('c') => self.request(Editor::request_clear_column),
            KeyCode::Char('C') => self.request(Editor::request_clear_group_subjects),
            _ => {}
        }
    }

    fn request(&mut self, request: fn(&Editor) -> Result<PendingConfirmation, EditError>) {
        match request(&self.editor) {
            Ok(pending) => self.mode = Mode::Confirm(pending),
            Err(err) => self.error(err.to_string()),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('f') if ctrl => self.apply_batch(BatchMode::FillColumn),
            KeyCode::Char('a') if ctrl => self.apply_batch(BatchMode::AppendRows),
            KeyCode::Char('u') if ctrl => self.editor.set_input_buffer(""),
            KeyCode::Char(c) if !ctrl => self.editor.input_buffer_mut().push(c),
            KeyCode::Enter => self.editor.input_buffer_mut().push('\n'),
            KeyCode::Backspace => {
                self.editor.input_buffer_mut().pop();
            }
            KeyCode::Esc => self.focus = Focus::Groups,
            _ => {}
        }
    }

    fn apply_batch(&mut self, mode: BatchMode) {
        let metric = self.editor.target_metric();
        match self.editor.batch_input(mode) {
            Ok(Some(applied)) => self.info(format!(
                "{metric}: {} updated, {} added",
                applied.updated, applied.created
            )),
            Ok(None) => self.error("No numbers found in the input"),
            Err(err) => self.error(err.to_string()),
        }
    }

    fn handle_report_key(&mut self, key: KeyEvent) {
        self.report_scroll = match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.report_scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.report_scroll.saturating_add(1),
            KeyCode::PageUp => self.report_scroll.saturating_sub(REPORT_PAGE),
            KeyCode::PageDown => self.report_scroll.saturating_add(REPORT_PAGE),
            KeyCode::Home => 0,
            _ => return,
        };
    }

    fn start_report(&mut self) {
        let started = self.report.start(
            Arc::clone(&self.generator),
            self.editor.snapshot(),
            DEFAULT_METRICS.to_vec(),
        );
        if started {
            self.info("Generating report...");
        } else {
            self.info("A report is already being generated");
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match (&self.mode, self.focus) {
            (Mode::Confirm(_), _) => &[(&["y", "Enter"], "Confirm"), (&["n", "Esc"], "Cancel")],
            (Mode::RenameGroup { .. } | Mode::EditCell { .. }, _) => {
                &[(&["Enter"], "Save"), (&["Esc"], "Cancel")]
            }
            (Mode::Normal, Focus::Groups) => &[
                (&["↑", "↓"], "Select"),
                (&["a"], "Add"),
                (&["d"], "Remove"),
                (&["r"], "Rename"),
                (&["[", "]"], "Metric"),
                (&["g"], "Report"),
                (&["Tab"], "Focus"),
                (&["q"], "Quit"),
            ],
            (Mode::Normal, Focus::Subjects) => &[
                (&["↑", "↓"], "Select"),
                (&["←", "→"], "Metric"),
                (&["Enter"], "Edit"),
                (&["a"], "Add"),
                (&["x"], "Delete"),
                (&["c"], "Clear column"),
                (&["C"], "Clear group"),
                (&["g"], "Report"),
                (&["Tab"], "Focus"),
            ],
            (Mode::Normal, Focus::Input) => &[
                (&["^F"], "Fill column"),
                (&["^A"], "Append rows"),
                (&["^U"], "Clear"),
                (&["F5"], "Report"),
                (&["Tab", "Esc"], "Leave"),
            ],
            (Mode::Normal, Focus::Report) => &[
                (&["↑", "↓", "PgUp", "PgDn"], "Scroll"),
                (&["g"], "Report"),
                (&["Tab"], "Focus"),
                (&["q"], "Quit"),
            ],
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let dataset = self.editor.dataset();
        let groups = dataset.groups();
        let active_group = self.editor.active_group();
        let target_metric = self.editor.target_metric();

        let [title_area, main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        let group_list_height = u16::try_from(groups.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(10);
        let [groups_pane, subjects_pane, input_pane] = Layout::vertical([
            Constraint::Length(group_list_height),
            Constraint::Fill(1),
            Constraint::Length(7),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(left_area);

        let [charts_area, report_pane] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .spacing(Spacing::Overlap(1))
                .areas(right_area);
        let [top_charts, bottom_charts] =
            Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(charts_area);
        let chart_row = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1));
        let [chart0, chart1] = chart_row.areas(top_charts);
        let [chart2, chart3] = chart_row.areas(bottom_charts);

        let subject_count = groups.iter().map(|group| group.len()).sum::<usize>();
        let title = Line::from(vec![
            Span::styled(
                " Open Field Test Analyzer ",
                Style::new().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} groups, {subject_count} subjects", groups.len()),
                style::HINT,
            ),
        ]);
        frame.render_widget(title, title_area);

        frame.render_widget(
            GroupList::new(groups, self.editor.active_group_index())
                .focused(self.focus.is_groups()),
            groups_pane,
        );

        let editing = match &self.mode {
            Mode::EditCell {
                subject,
                metric,
                buffer,
            } => Some(CellEdit {
                subject: *subject,
                metric: *metric,
                text: buffer,
            }),
            _ => None,
        };
        let selected = (self.focus.is_subjects() && self.active_len() > 0)
            .then_some(self.selected_subject);
        frame.render_widget(
            SubjectTable::new(active_group, target_metric)
                .selected(selected)
                .editing(editing)
                .focused(self.focus.is_subjects()),
            subjects_pane,
        );

        frame.render_widget(
            BatchInput::new(
                self.editor.input_buffer(),
                active_group.map_or("", |group| group.name.as_str()),
                target_metric,
            )
            .focused(self.focus.is_input() && matches!(self.mode, Mode::Normal)),
            input_pane,
        );

        for (metric, area) in CHART_METRICS.into_iter().zip([chart0, chart1, chart2, chart3]) {
            frame.render_widget(
                MetricChart::new(metric, groups).targeted(metric == target_metric),
                area,
            );
        }

        frame.render_widget(
            ReportView::new(self.report.report())
                .scroll(self.report_scroll)
                .focused(self.focus.is_report()),
            report_pane,
        );

        if let Some(status) = &self.status {
            let status_style = if status.is_error {
                style::ERROR
            } else {
                Style::new()
            };
            frame.render_widget(Line::styled(status.text.as_str(), status_style), status_area);
        }
        frame.render_widget(KeyBindingDisplay::new(self.key_bindings()), help_area);

        match &self.mode {
            Mode::Confirm(pending) => {
                frame.render_widget(ConfirmDialog::new(pending.prompt()), frame.area());
            }
            Mode::RenameGroup { buffer } => {
                frame.render_widget(TextPromptDialog::new("Rename group", buffer), frame.area());
            }
            Mode::Normal | Mode::EditCell { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Mutex,
            mpsc::{self, Receiver, Sender},
        },
        thread,
        time::{Duration, Instant},
    };

    use openfield_model::{Dataset, Metric};
    use openfield_report::ReportError;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    struct EchoGenerator;

    impl ReportGenerator for EchoGenerator {
        fn generate(&self, dataset: &Dataset, metrics: &[Metric]) -> Result<String, ReportError> {
            Ok(format!(
                "# Report\n{} groups, {} metrics",
                dataset.len(),
                metrics.len()
            ))
        }
    }

    /// Waits for the test to release it, then lists the subject counts it was given.
    struct GatedGenerator {
        gate: Mutex<Receiver<()>>,
    }

    impl GatedGenerator {
        fn new() -> (Self, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            (Self { gate: Mutex::new(rx) }, tx)
        }
    }

    impl ReportGenerator for GatedGenerator {
        fn generate(&self, dataset: &Dataset, _metrics: &[Metric]) -> Result<String, ReportError> {
            self.gate.lock().unwrap().recv().unwrap();
            let sizes = dataset
                .groups()
                .iter()
                .map(|group| group.len().to_string())
                .collect::<Vec<_>>();
            Ok(format!("subjects: {}", sizes.join("/")))
        }
    }

    fn wait_for_report(screen: &mut EditorScreen) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while screen.report.is_loading() {
            assert!(Instant::now() < deadline, "report did not finish");
            thread::sleep(Duration::from_millis(5));
            screen.update();
        }
    }

    fn screen() -> EditorScreen {
        EditorScreen::new(Editor::default(), Arc::new(EchoGenerator))
    }

    fn press(screen: &mut EditorScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn ctrl(screen: &mut EditorScreen, c: char) {
        screen.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )));
    }

    fn type_text(screen: &mut EditorScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn column(screen: &EditorScreen, metric: Metric) -> Vec<f64> {
        screen.editor.active_group().unwrap().metric_values(metric)
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut screen = screen();
        assert_eq!(screen.focus, Focus::Groups);
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focus, Focus::Subjects);
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focus, Focus::Report);
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focus, Focus::Groups);
        press(&mut screen, KeyCode::BackTab);
        assert_eq!(screen.focus, Focus::Report);
    }

    #[test]
    fn test_add_and_rename_group() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('a'));
        assert_eq!(screen.editor.dataset().len(), 3);
        assert_eq!(screen.editor.active_group_index(), 2);

        press(&mut screen, KeyCode::Char('r'));
        for _ in 0.."Group 3".len() {
            press(&mut screen, KeyCode::Backspace);
        }
        type_text(&mut screen, "Knockout");
        press(&mut screen, KeyCode::Enter);

        assert!(matches!(screen.mode, Mode::Normal));
        assert_eq!(screen.editor.active_group().unwrap().name, "Knockout");
    }

    #[test]
    fn test_rename_cancel_keeps_name() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('r'));
        type_text(&mut screen, "xyz");
        press(&mut screen, KeyCode::Esc);
        assert_eq!(screen.editor.active_group().unwrap().name, "Control");
        assert!(!screen.should_exit());
    }

    #[test]
    fn test_last_group_cannot_be_removed() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('d'));
        assert_eq!(screen.editor.dataset().len(), 1);
        press(&mut screen, KeyCode::Char('d'));
        assert_eq!(screen.editor.dataset().len(), 1);
        assert!(screen.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_paste_then_fill_column() {
        let mut screen = screen();
        screen.handle_event(&Event::Paste("1\n2\n3".to_owned()));
        assert_eq!(screen.focus, Focus::Input);
        ctrl(&mut screen, 'f');

        assert_eq!(
            column(&screen, Metric::TotalDistance),
            [1.0, 2.0, 3.0, 2550.0]
        );
        assert_eq!(screen.editor.input_buffer(), "");
    }

    #[test]
    fn test_typed_append_rows() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.editor.target_metric(), Metric::CenterTime);
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "7, 8");
        ctrl(&mut screen, 'a');

        assert_eq!(
            column(&screen, Metric::CenterTime),
            [45.0, 50.0, 40.0, 48.0, 7.0, 8.0]
        );
        assert_eq!(column(&screen, Metric::TotalDistance)[4], 0.0);
    }

    #[test]
    fn test_empty_batch_is_reported() {
        let mut screen = screen();
        screen.handle_event(&Event::Paste("abc".to_owned()));
        ctrl(&mut screen, 'f');
        assert_eq!(screen.editor.input_buffer(), "abc");
        assert_eq!(screen.editor.revision(), 0);
        assert!(screen.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_clear_column_requires_confirmation() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);

        press(&mut screen, KeyCode::Char('c'));
        assert!(matches!(screen.mode, Mode::Confirm(_)));
        press(&mut screen, KeyCode::Char('x'));
        assert!(matches!(screen.mode, Mode::Confirm(_)));
        press(&mut screen, KeyCode::Char('n'));
        assert!(matches!(screen.mode, Mode::Normal));
        assert_eq!(column(&screen, Metric::TotalDistance)[0], 2500.0);

        press(&mut screen, KeyCode::Char('c'));
        press(&mut screen, KeyCode::Char('y'));
        assert_eq!(column(&screen, Metric::TotalDistance), [0.0; 4]);
        assert_eq!(column(&screen, Metric::Velocity)[0], 5.2);
    }

    #[test]
    fn test_clear_group_subjects() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Char('C'));
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.active_len(), 0);
        assert_eq!(screen.selected_subject, 0);
    }

    #[test]
    fn test_cell_edit() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Down);

        press(&mut screen, KeyCode::Enter);
        for _ in 0.."2450".len() {
            press(&mut screen, KeyCode::Backspace);
        }
        type_text(&mut screen, "abc");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(column(&screen, Metric::TotalDistance)[1], 2450.0);
        assert!(screen.status.as_ref().unwrap().is_error);

        press(&mut screen, KeyCode::Enter);
        for _ in 0.."2450".len() {
            press(&mut screen, KeyCode::Backspace);
        }
        type_text(&mut screen, "42.5");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(column(&screen, Metric::TotalDistance)[1], 42.5);
    }

    #[test]
    fn test_delete_and_add_subject() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.selected_subject, 3);
        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.active_len(), 3);
        assert_eq!(screen.selected_subject, 2);

        press(&mut screen, KeyCode::Char('a'));
        assert_eq!(screen.active_len(), 4);
        assert_eq!(screen.selected_subject, 3);
        assert_eq!(column(&screen, Metric::Rearing)[3], 0.0);
    }

    #[test]
    fn test_group_selection_resets_subject() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::BackTab);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.editor.active_group().unwrap().name, "Model");
        assert_eq!(screen.selected_subject, 0);
    }

    #[test]
    fn test_report_generation() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('g'));
        assert!(screen.report.report().loading);

        wait_for_report(&mut screen);
        assert_eq!(screen.report.report().markdown, "# Report\n2 groups, 3 metrics");
    }

    #[test]
    fn test_editing_during_report_keeps_started_dataset() {
        let (generator, release) = GatedGenerator::new();
        let mut screen = EditorScreen::new(Editor::default(), Arc::new(generator));
        press(&mut screen, KeyCode::Char('g'));
        assert!(screen.report.is_loading());

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char('x'));
        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.active_len(), 2);
        screen.update();
        assert!(screen.report.is_loading());

        release.send(()).unwrap();
        wait_for_report(&mut screen);
        assert_eq!(screen.report.report().markdown, "subjects: 4/4");
        assert_eq!(screen.active_len(), 2);
    }

    #[test]
    fn test_quit() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.should_exit());
    }

    #[test]
    fn test_draw() {
        let mut screen = screen();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let rendered = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        assert!(rendered.contains("Groups"));
        assert!(rendered.contains("Control"));
        assert!(rendered.contains("Total Distance"));
        assert!(rendered.contains("AI Report"));

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char('C'));
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let rendered = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        assert!(rendered.contains("Confirm"));

        let mut tiny = Terminal::new(TestBackend::new(10, 4)).unwrap();
        tiny.draw(|frame| screen.draw(frame)).unwrap();
    }
}
