//! The `ReportWriter` trait: a pluggable backend for simulation output.

use sf_agent::AgentOutcome;
use sf_sim::SimReport;

use crate::OutputResult;

/// Trait implemented by each output backend (CSV, JSON, SQLite).
///
/// Outcomes arrive in batches as cohorts finish; the aggregate sections of
/// the report arrive once at the end of the run.
pub trait ReportWriter {
    /// Write the path log and summary of each finished visit.
    fn write_outcomes(&mut self, outcomes: &[AgentOutcome]) -> OutputResult<()>;

    /// Write the aggregate sections: statistics, heatmap, shelf and register
    /// figures, recommendations.
    fn write_report(&mut self, report: &SimReport) -> OutputResult<()>;

    /// Flush and close all output.  Must be idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
