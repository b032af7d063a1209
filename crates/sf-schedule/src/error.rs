use thiserror::Error;

use sf_core::SimTime;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("peak window {start}..{end} does not lie within opening hours {open}..{close}")]
    PeakOutsideHours { start: SimTime, end: SimTime, open: SimTime, close: SimTime },

    #[error("peak fraction {0} is not in [0, 1]")]
    PeakFraction(f64),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
