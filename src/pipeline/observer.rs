//! Stage observers.
//!
//! The runner calls [`PipelineObserver::on_stage_start`] and
//! [`PipelineObserver::on_stage_end`] around every stage. Both default to
//! no-ops, so an observer only overrides what it needs.

use std::time::{Duration, Instant};

pub const STAGE_RESOLVE: &str = "resolve";
pub const STAGE_BUILD: &str = "build";
pub const STAGE_PARSE_TIME: &str = "parse_time";
pub const STAGE_DOCUMENT_FREQUENCY: &str = "document_frequency";
pub const STAGE_IDF: &str = "idf";
pub const STAGE_TF: &str = "tf";
pub const STAGE_TF_IDF: &str = "tf_idf";
pub const STAGE_RANK: &str = "rank";

/// Stage names in execution order
pub const STAGES: [&str; 8] = [
    STAGE_RESOLVE,
    STAGE_BUILD,
    STAGE_PARSE_TIME,
    STAGE_DOCUMENT_FREQUENCY,
    STAGE_IDF,
    STAGE_TF,
    STAGE_TF_IDF,
    STAGE_RANK,
];

/// Measures wall time of one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: &'static str,
    pub elapsed: Duration,
    /// Rows (characters) in the stage output
    pub rows: usize,
    /// Columns (movies) in the stage output; zero for per-character outputs
    pub columns: usize,
}

impl StageReport {
    pub fn new(stage: &'static str, elapsed: Duration) -> Self {
        Self {
            stage,
            elapsed,
            rows: 0,
            columns: 0,
        }
    }

    pub fn with_shape(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }
}

/// Hooks called at each stage boundary
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _report: &StageReport) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that keeps every stage report
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub started: Vec<&'static str>,
    pub reports: Vec<StageReport>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports.iter().find(|r| r.stage == stage)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|r| r.elapsed).sum()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_stage_start(&mut self, stage: &'static str) {
        self.started.push(stage);
    }

    fn on_stage_end(&mut self, report: &StageReport) {
        self.reports.push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let mut obs = RecordingObserver::new();
        obs.on_stage_start(STAGE_TF);
        obs.on_stage_end(
            &StageReport::new(STAGE_TF, Duration::from_millis(2)).with_shape(3, 4),
        );

        assert_eq!(obs.started, vec![STAGE_TF]);
        let report = obs.report(STAGE_TF).unwrap();
        assert_eq!((report.rows, report.columns), (3, 4));
        assert_eq!(obs.total_elapsed(), Duration::from_millis(2));
        assert!(obs.report(STAGE_RANK).is_none());
    }
}
