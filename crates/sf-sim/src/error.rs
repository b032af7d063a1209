use sf_core::CoreError;
use sf_schedule::ScheduleError;
use thiserror::Error;

/// Faults that stop a run before any customer enters the store.
///
/// Per-customer failures are never errors; they end up as a
/// [`TerminalStatus`](sf_agent::TerminalStatus) in the report.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
