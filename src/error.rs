//! Scheduling run errors.
//!
//! Only structural problems that prevent a run from starting are errors.
//! Infeasible landings are expressed as cost, never as `Err`.

use std::time::Duration;

use thiserror::Error;

/// Why a scheduling run could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("flight snapshot is empty")]
    EmptySnapshot,

    #[error("airport has no runways")]
    NoRunways,

    #[error("invalid population bounds: min {min}, max {max} (need 2 <= min <= max)")]
    InvalidPopulation { min: usize, max: usize },

    #[error("flight radar not ready after {0:?}")]
    RadarNotReady(Duration),
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
