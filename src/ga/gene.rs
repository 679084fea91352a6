//! Per-flight landing decision.

use std::sync::Arc;

use crate::models::{FlightContact, SpeedProfile};

/// One flight's decision inside a schedule: runway and approach speed, plus
/// the timing and cost the evaluator derives from them.
#[derive(Debug, Clone)]
pub struct Gene {
    /// Flight this decision belongs to.
    pub flight: Arc<FlightContact>,
    /// Index into `Airport::runways`.
    pub runway: usize,
    /// Approach speed profile.
    pub speed: SpeedProfile,
    /// Realized landing time (s). Written by the evaluator.
    pub arrival_s: f64,
    /// Economic cost of this landing. Written by the evaluator.
    pub cost: f64,
    /// Holding time (s) imposed by separation, when separation was binding.
    pub wait_s: Option<f64>,
}

impl Gene {
    pub fn new(flight: Arc<FlightContact>, runway: usize, speed: SpeedProfile) -> Self {
        Self {
            flight,
            runway,
            speed,
            arrival_s: 0.0,
            cost: 0.0,
            wait_s: None,
        }
    }

    #[inline]
    pub fn flight_id(&self) -> &str {
        &self.flight.flight_id
    }

    /// Whether both genes schedule the same flight.
    #[inline]
    pub fn same_flight(&self, other: &Gene) -> bool {
        self.flight_id() == other.flight_id()
    }

    /// Clears evaluator output, keeping the decision.
    pub fn reset_evaluation(&mut self) {
        self.arrival_s = 0.0;
        self.cost = 0.0;
        self.wait_s = None;
    }

    /// Landing delay against the desired time (s, negative when early).
    #[inline]
    pub fn delay_s(&self) -> f64 {
        self.arrival_s - self.flight.desired_landing_s
    }
}
