//! GA-based landing schedule optimization.
//!
//! Searches over landing order, runway and approach speed for the
//! sequence with the lowest economic cost, within a wall-clock budget.
//!
//! # Encoding
//!
//! - **Sequence**: gene order is landing order, one gene per flight.
//! - **Runway**: per-gene index into the airport's runway list.
//! - **Speed**: per-gene approach speed profile (min/optimal/max).
//!
//! # Submodules
//!
//! - [`operators`]: strategy traits and the default selection, crossover,
//!   mutation and reinsertion operators
//!
//! [`LandingProblem`] implements `u_metaheur::ga::GaProblem`, so a snapshot
//! can also be searched with the generic `u_metaheur::ga::GaRunner`.
//!
//! # Reference
//! - Beasley et al. (2000), "Scheduling aircraft landings: the static case"
//! - Hu & Chen (2005), "Genetic algorithm based on receding horizon control
//!   for arrival sequencing and scheduling"

mod chromosome;
mod config;
mod fitness;
mod gene;
pub mod operators;
mod problem;
mod runner;

pub use chromosome::ScheduleChromosome;
pub use config::{CostConfig, GaConfig, SequencingClock};
pub use fitness::{RunwayPolicy, TimelineEvaluator};
pub use gene::Gene;
pub use operators::{
    ElitistReinsertion, EliteSelection, Evaluate, LandingMutation, Perturb, PrefixCrossover,
    Recombine, Reinsert, Select,
};
pub use problem::LandingProblem;
pub use runner::{GaPhase, GaResult, GaRunner, StopReason};
