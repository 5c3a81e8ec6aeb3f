use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver, TryRecvError},
    },
    thread,
};

use chrono::{DateTime, Local};
use openfield_model::{Dataset, Metric};
use tracing::{info, warn};

use crate::generator::{ANALYSIS_FAILED_MESSAGE, ReportError, ReportGenerator, report_text};

/// Report shown to the user.
///
/// Each finished generation replaces the previous text entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub markdown: String,
    pub loading: bool,
    pub timestamp: Option<DateTime<Local>>,
}

#[derive(Debug)]
struct ReportTask {
    receiver: Receiver<Result<String, ReportError>>,
}

impl ReportTask {
    fn spawn(generator: Arc<dyn ReportGenerator>, dataset: Dataset, metrics: Vec<Metric>) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let result = generator.generate(&dataset, &metrics);
            // The receiver is gone only if the state was dropped; nothing to report to.
            let _ = sender.send(result);
        });
        Self { receiver }
    }
}

/// Report text plus the single in-flight generation, if any.
#[derive(Debug, Default)]
pub struct ReportState {
    report: AnalysisReport,
    task: Option<ReportTask>,
}

impl ReportState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }

    /// Starts generating a report from a snapshot of the data.
    ///
    /// Returns `false` without doing anything while a generation is already
    /// running. The previous report stays visible until the new one arrives.
    pub fn start(
        &mut self,
        generator: Arc<dyn ReportGenerator>,
        dataset: Dataset,
        metrics: Vec<Metric>,
    ) -> bool {
        if self.task.is_some() {
            return false;
        }
        info!(
            groups = dataset.len(),
            metrics = metrics.len(),
            "report generation started"
        );
        self.report.loading = true;
        self.task = Some(ReportTask::spawn(generator, dataset, metrics));
        true
    }

    /// Collects the result of the running generation if it has finished.
    ///
    /// Returns `true` when the report was just replaced.
    pub fn poll(&mut self) -> bool {
        let Some(task) = &self.task else {
            return false;
        };
        let markdown = match task.receiver.try_recv() {
            Ok(result) => {
                match &result {
                    Ok(text) => info!(len = text.len(), "report generation finished"),
                    Err(err) => warn!(%err, "report generation failed"),
                }
                report_text(result)
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                warn!("report worker exited without a result");
                ANALYSIS_FAILED_MESSAGE.to_owned()
            }
        };
        self.task = None;
        self.report = AnalysisReport {
            markdown,
            loading: false,
            timestamp: Some(Local::now()),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Mutex, mpsc::Sender},
        time::{Duration, Instant},
    };

    use openfield_model::editor::Editor;

    use super::*;
    use crate::generator::MISSING_KEY_MESSAGE;

    #[derive(Debug)]
    struct FixedGenerator(Result<&'static str, fn() -> ReportError>);

    impl ReportGenerator for FixedGenerator {
        fn generate(&self, dataset: &Dataset, metrics: &[Metric]) -> Result<String, ReportError> {
            match self.0 {
                Ok(text) => Ok(format!("{text}: {} groups, {} metrics", dataset.len(), metrics.len())),
                Err(make) => Err(make()),
            }
        }
    }

    /// Blocks until the test releases it, then describes the dataset it was given.
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
            Ok(format!("released: [{}]", sizes.join(", ")))
        }
    }

    struct PanickingGenerator;

    impl ReportGenerator for PanickingGenerator {
        fn generate(&self, _dataset: &Dataset, _metrics: &[Metric]) -> Result<String, ReportError> {
            panic!("generator failure");
        }
    }

    fn wait_for_report(state: &mut ReportState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.poll() {
            assert!(Instant::now() < deadline, "report did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_successful_report_replaces_text() {
        let mut state = ReportState::new();
        assert!(!state.poll());

        let generator = Arc::new(FixedGenerator(Ok("done")));
        assert!(state.start(generator, Dataset::default(), vec![Metric::Velocity]));
        assert!(state.report().loading);
        wait_for_report(&mut state);

        let report = state.report();
        assert_eq!(report.markdown, "done: 2 groups, 1 metrics");
        assert!(!report.loading);
        assert!(report.timestamp.is_some());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_shows_fixed_message() {
        let mut state = ReportState::new();
        let generator = Arc::new(FixedGenerator(Err(|| ReportError::MissingApiKey)));
        state.start(generator, Dataset::default(), Vec::new());
        wait_for_report(&mut state);
        assert_eq!(state.report().markdown, MISSING_KEY_MESSAGE);
    }

    #[test]
    fn test_second_start_is_refused_while_in_flight() {
        let mut state = ReportState::new();
        let (generator, release) = GatedGenerator::new();
        let generator: Arc<dyn ReportGenerator> = Arc::new(generator);

        assert!(state.start(Arc::clone(&generator), Dataset::default(), Vec::new()));
        assert!(!state.start(Arc::clone(&generator), Dataset::default(), Vec::new()));
        assert!(!state.poll());
        assert!(state.is_loading());

        release.send(()).unwrap();
        wait_for_report(&mut state);
        assert_eq!(state.report().markdown, "released: [4, 4]");

        assert!(state.start(generator, Dataset::default(), Vec::new()));
        release.send(()).unwrap();
        wait_for_report(&mut state);
    }

    #[test]
    fn test_editing_continues_while_report_uses_start_snapshot() {
        let mut editor = Editor::default();
        let mut state = ReportState::new();
        let (generator, release) = GatedGenerator::new();

        assert!(state.start(Arc::new(generator), editor.snapshot(), vec![Metric::TotalDistance]));
        assert!(state.is_loading());

        editor.delete_subject(0).unwrap();
        editor.add_single_subject().unwrap();
        editor.add_single_subject().unwrap();
        assert_eq!(editor.active_group().unwrap().len(), 5);
        assert!(!state.poll());
        assert!(state.is_loading());

        release.send(()).unwrap();
        wait_for_report(&mut state);
        assert_eq!(state.report().markdown, "released: [4, 4]");
        assert_eq!(editor.active_group().unwrap().len(), 5);
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let mut state = ReportState::new();
        state.start(Arc::new(PanickingGenerator), Dataset::default(), Vec::new());
        wait_for_report(&mut state);
        assert_eq!(state.report().markdown, ANALYSIS_FAILED_MESSAGE);
    }
}
