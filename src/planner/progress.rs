/// Receives `(generation_index, best_accuracy_percent)` while a run is in
/// progress. Purely observational.
pub trait ProgressSink {
    fn report(&mut self, generation: usize, best_accuracy: f64);
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, f64),
{
    fn report(&mut self, generation: usize, best_accuracy: f64) {
        self(generation, best_accuracy)
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _generation: usize, _best_accuracy: f64) {}
}

/// How often to report: about ten times per run, never less than every generation.
pub fn report_interval(generation_count: usize, reports_per_run: usize) -> usize {
    (generation_count / reports_per_run.max(1)).max(1)
}
