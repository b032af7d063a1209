//! `ReportObserver<W>`: bridges `SimObserver` to a `ReportWriter`.

use tracing::{debug, warn};

use sf_agent::AgentOutcome;
use sf_core::SimTime;
use sf_schedule::CohortKind;
use sf_sim::{SimObserver, SimReport};

use crate::writer::ReportWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams finished visits to any [`ReportWriter`]
/// backend (CSV, JSON, SQLite) as each cohort ends, then writes the
/// aggregate sections and closes the writer when the run ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer:     W,
    pending:    Vec<AgentOutcome>,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), written: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Outcomes handed to the writer so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.pending);
        let result = self.writer.write_outcomes(&batch);
        if result.is_ok() {
            self.written += batch.len();
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "report output failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> SimObserver for ReportObserver<W> {
    fn on_agent_finished(&mut self, outcome: &AgentOutcome) {
        self.pending.push(outcome.clone());
    }

    fn on_cohort_end(&mut self, kind: CohortKind, _clock: SimTime) {
        debug!(cohort = %kind, outcomes = self.pending.len(), "writing cohort outcomes");
        self.flush_pending();
    }

    fn on_run_end(&mut self, report: &SimReport) {
        self.flush_pending();
        let result = self.writer.write_report(report);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
