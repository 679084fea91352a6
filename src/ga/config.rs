//! GA and cost-model configuration.
//!
//! Both structures are plain policy data: the evolution driver and the
//! timeline evaluator read them but never change them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the evaluator tracks the leading landing for separation lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencingClock {
    /// The first landing of the run fixes the leading runway and class for
    /// every later separation lookup. All runways share one clock.
    #[default]
    FirstLanding,
    /// Each landing becomes the leader of the next one.
    PreviousLanding,
}

/// Economic constants of the landing cost model.
///
/// Rates are cost units per minute unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Fuel burn rate. Applied per minute of early arrival and per
    /// second of separation holding.
    pub fuel_rate: f64,
    /// Crew cost rate, applied per minute of delay.
    pub crew_rate: f64,
    /// Pilot cost rate, applied per minute of early arrival.
    pub pilot_rate: f64,
    /// Extra delay weight for emergencies: delay cost × (1 + multiplier).
    pub emergency_multiplier: f64,
    /// Cost per passenger per minute of missing turnaround buffer.
    pub turnaround_rate: f64,
    /// Deviation from the desired landing time that costs nothing (s).
    pub schedule_tolerance_s: f64,
    /// Minimum buffer between landing and next departure (s).
    pub turnaround_buffer_s: f64,
    /// Penalty for landing outside the runway's wind window.
    pub wind_penalty: f64,
    /// Cost of a landing the runway does not accept.
    pub infeasible_cost: f64,
    /// Leader tracking for separation lookups.
    pub sequencing_clock: SequencingClock,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            fuel_rate: 40.0,
            crew_rate: 30.0,
            pilot_rate: 25.0,
            emergency_multiplier: 10.0,
            turnaround_rate: 0.5,
            schedule_tolerance_s: 5.0,
            turnaround_buffer_s: 30.0 * 60.0,
            wind_penalty: 500.0,
            infeasible_cost: 1e9,
            sequencing_clock: SequencingClock::FirstLanding,
        }
    }
}

impl CostConfig {
    /// Sets the leader tracking mode.
    pub fn with_sequencing_clock(mut self, clock: SequencingClock) -> Self {
        self.sequencing_clock = clock;
        self
    }

    /// Sets the wind window penalty.
    pub fn with_wind_penalty(mut self, penalty: f64) -> Self {
        self.wind_penalty = penalty;
        self
    }
}

/// Evolution driver parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Population floor; also the number of parents selected per generation.
    pub min_population: usize,
    /// Population ceiling after reinsertion.
    pub max_population: usize,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Probability that a child is perturbed.
    pub mutation_rate: f64,
    /// Wall-clock budget of one run.
    pub time_budget: Duration,
    /// Optional generation cap.
    pub max_generations: Option<usize>,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Evaluate each generation on the rayon pool.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            min_population: 50,
            max_population: 70,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            time_budget: Duration::from_secs(5),
            max_generations: None,
            seed: None,
            parallel: true,
        }
    }
}

impl GaConfig {
    /// Sets the population bounds.
    pub fn with_population(mut self, min: usize, max: usize) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = Some(generations);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_defaults() {
        let c = CostConfig::default();
        assert_eq!(c.schedule_tolerance_s, 5.0);
        assert_eq!(c.turnaround_buffer_s, 1800.0);
        assert!(c.infeasible_cost.is_finite());
        assert_eq!(c.sequencing_clock, SequencingClock::FirstLanding);
    }

    #[test]
    fn test_ga_builder() {
        let cfg = GaConfig::default()
            .with_population(10, 20)
            .with_mutation_rate(1.5)
            .with_max_generations(5)
            .with_seed(7)
            .with_parallel(false);

        assert_eq!(cfg.min_population, 10);
        assert_eq!(cfg.max_population, 20);
        assert_eq!(cfg.mutation_rate, 1.0);
        assert_eq!(cfg.max_generations, Some(5));
        assert_eq!(cfg.seed, Some(7));
        assert!(!cfg.parallel);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let cfg = GaConfig::default().with_seed(3);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);

        let costs: CostConfig = serde_json::from_str(&serde_json::to_string(&CostConfig::default()).unwrap()).unwrap();
        assert_eq!(costs, CostConfig::default());
    }
}
