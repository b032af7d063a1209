//! Simulation observer trait for progress reporting and data collection.

use sf_agent::AgentOutcome;
use sf_core::SimTime;
use sf_schedule::{Cohort, CohortKind};

use crate::SimReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points of a run.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Callbacks run on the calling thread, never
/// on the worker pool.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_cohort_end(&mut self, kind: CohortKind, clock: SimTime) {
///         println!("{kind} cohort done, store clock at {clock}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once, after arrival times are assigned.
    fn on_run_start(&mut self, _agents: usize, _cohorts: usize) {}

    /// Called before a cohort's customers are released onto the floor.
    ///
    /// `clock` is the earliest time any of them may start.
    fn on_cohort_start(&mut self, _cohort: &Cohort, _clock: SimTime) {}

    /// Called for every customer of a cohort, in arrival order, once the
    /// whole cohort has finished.
    fn on_agent_finished(&mut self, _outcome: &AgentOutcome) {}

    /// Called after a cohort with the advanced store clock.
    fn on_cohort_end(&mut self, _kind: CohortKind, _clock: SimTime) {}

    /// Called once with the final report.
    fn on_run_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
