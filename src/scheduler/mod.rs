//! Baseline scheduler and KPI evaluation.
//!
//! Provides the FIFO landing baseline the GA is measured against, and
//! schedule quality metrics for both.
//!
//! # Algorithm
//!
//! `FifoScheduler` lands flights in radar admission order at optimal speed,
//! rotating over the active wind group's runways. It is not optimal, but
//! reflects current first-come-first-served practice.
//!
//! # KPI
//!
//! `ScheduleKpi` computes final arrival, average delay, average cost,
//! holding time and infeasible landing count.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1
//! - Beasley et al. (2000), "Scheduling aircraft landings: the static case"

mod fifo;
mod kpi;

pub use fifo::FifoScheduler;
pub use kpi::ScheduleKpi;
