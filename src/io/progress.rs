//! Export progress tracking with automatic batching for large job sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for a run of exports
///
/// Shows one line per export for small runs and adds a single batch bar
/// once the job count outgrows the individual lines.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    job_bars: Vec<ProgressBar>,
    job_count: usize,
    /// Stores (`label`, `state`) for rolling window display
    job_states: Vec<(String, String)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static JOB_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix:<28} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Exports: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            job_bars: Vec::new(),
            job_count: 0,
            job_states: Vec::new(),
        }
    }

    /// Number of jobs announced by [`Self::initialize`]
    pub const fn job_count(&self) -> usize {
        self.job_count
    }

    /// Initialize progress lines based on job count
    pub fn initialize(&mut self, job_count: usize) {
        self.job_count = job_count;

        // Switch to batch mode for large job sets to avoid terminal spam
        if job_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(job_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = job_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new_spinner();
            pb.set_style(JOB_STYLE.clone());
            self.job_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Mark an export as started
    pub fn start_job(&mut self, index: usize, label: &str) {
        self.set_state(index, label.to_string(), "rendering".to_string());
    }

    /// Mark an export as written
    pub fn complete_job(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        self.update_state(index, format!("✓ {elapsed:.0?}"));
    }

    /// Mark an export as skipped, e.g. because no image is loaded
    pub fn skip_job(&mut self, index: usize, reason: &str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        self.update_state(index, format!("skipped ({reason})"));
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All exports processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn set_state(&mut self, index: usize, label: String, state: String) {
        if index >= self.job_states.len() {
            self.job_states.resize(index + 1, (String::new(), String::new()));
        }
        if let Some(slot) = self.job_states.get_mut(index) {
            *slot = (label, state);
        }
        self.update_bars();
    }

    fn update_state(&mut self, index: usize, state: String) {
        if let Some(slot) = self.job_states.get_mut(index) {
            slot.1 = state;
        }
        self.update_bars();
    }

    /// Update all lines to show the last N active jobs
    fn update_bars(&self) {
        let active_jobs: Vec<&(String, String)> = self
            .job_states
            .iter()
            .filter(|(label, _)| !label.is_empty())
            .collect();

        let start_idx = active_jobs
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_jobs = active_jobs.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, state)) in visible_jobs.iter().copied().enumerate() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_prefix(label.clone());
                bar.set_message(state.clone());
                bar.tick();
            }
        }

        // Clear any unused lines
        for bar_idx in visible_jobs.len()..self.job_bars.len() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_prefix(String::new());
                bar.set_message(String::new());
            }
        }
    }
}
