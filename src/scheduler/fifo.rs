//! First-come-first-served landing baseline.
//!
//! # Algorithm
//!
//! 1. Land flights in radar admission order.
//! 2. Every flight flies its optimal speed.
//! 3. Runways rotate round-robin over the wind group active at the current
//!    sequencing clock, falling back to all runways when none is active.
//!
//! The result is evaluated with the same timeline and cost model as the GA,
//! so the two are directly comparable.
//!
//! # Complexity
//! O(n) where n = flights.

use std::sync::Arc;

use crate::ga::{CostConfig, Gene, RunwayPolicy, ScheduleChromosome, TimelineEvaluator};
use crate::models::{Airport, SpeedProfile};
use crate::radar::FlightSnapshot;

/// Deterministic FIFO scheduler.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_landing::ga::CostConfig;
/// use u_landing::models::{AircraftProfile, AircraftType, Airport, FlightContact, Runway, WindGroup};
/// use u_landing::radar::FlightSnapshot;
/// use u_landing::scheduler::FifoScheduler;
///
/// let airport = Arc::new(Airport::new("LPPT").with_runway(Runway::new("03", WindGroup::A)));
/// let a320 = Arc::new(AircraftProfile::new("A320", AircraftType::Medium, 140.0));
/// let snapshot = FlightSnapshot::new(vec![
///     FlightContact::new("TP100", a320.clone()).with_runway_distance("03", 20.0),
///     FlightContact::new("TP200", a320).with_runway_distance("03", 25.0),
/// ]);
///
/// let schedule = FifoScheduler::new(airport, CostConfig::default()).schedule(&snapshot);
/// assert_eq!(schedule.flight_ids(), vec!["TP100", "TP200"]);
/// assert!(schedule.is_evaluated());
/// ```
#[derive(Debug, Clone)]
pub struct FifoScheduler {
    evaluator: TimelineEvaluator,
}

impl FifoScheduler {
    pub fn new(airport: Arc<Airport>, costs: CostConfig) -> Self {
        Self {
            evaluator: TimelineEvaluator::new(airport, costs).with_policy(RunwayPolicy::WindRule),
        }
    }

    /// Builds and evaluates the FIFO schedule for `snapshot`.
    pub fn schedule(&self, snapshot: &FlightSnapshot) -> ScheduleChromosome {
        let genes = snapshot
            .iter()
            .map(|flight| Gene::new(Arc::clone(flight), 0, SpeedProfile::Optimal))
            .collect();
        let mut chromosome = ScheduleChromosome::from_genes(genes);
        self.evaluator.evaluate_chromosome(&mut chromosome);
        chromosome
    }
}
