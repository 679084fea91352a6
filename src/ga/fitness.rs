//! Timeline evaluator.
//!
//! Turns an ordered chromosome into realized landing times and an economic
//! cost. This is the only place where schedule time is computed.
//!
//! # Algorithm
//!
//! One pass over the genes in landing order, with one clock per runway:
//!
//! 1. The first landing arrives after its own travel time and sets every
//!    runway clock to that arrival.
//! 2. Each later landing needs `sep` seconds behind the leading landing
//!    (looked up by leading runway and class pair) and `earliest` seconds
//!    of remaining flight. Every runway clock advances by
//!    `max(sep, earliest)`; when `sep` binds, the difference is recorded
//!    as holding time.
//! 3. Each landing is then costed (holding fuel, schedule deviation,
//!    turnaround shortfall, runway feasibility and wind window).
//!
//! Infeasible choices are not rejected: they receive a large finite cost so
//! the search can still rank them.

use std::collections::HashMap;
use std::sync::Arc;

use super::operators::Evaluate;
use super::{CostConfig, Gene, ScheduleChromosome, SequencingClock};
use crate::models::{Airport, AircraftType, Runway};

/// Where each landing's runway comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunwayPolicy {
    /// The runway stored in the gene (search mode).
    #[default]
    Assigned,
    /// Round-robin over the runways of the active wind group at the
    /// current clock (FIFO baseline). The chosen runway is written back.
    WindRule,
}

/// Per-pass evaluation state. Lives on the stack of one evaluation.
struct Timeline {
    clocks: Vec<f64>,
    leader: Option<usize>,
    last_type: HashMap<usize, AircraftType>,
    rotation: usize,
}

impl Timeline {
    fn new(runway_count: usize) -> Self {
        Self {
            clocks: vec![0.0; runway_count],
            leader: None,
            last_type: HashMap::new(),
            rotation: 0,
        }
    }

    fn now(&self) -> f64 {
        self.clocks.first().copied().unwrap_or(0.0)
    }

    fn record_leader(&mut self, runway: usize, aircraft_type: AircraftType) {
        self.leader = Some(runway);
        self.last_type.insert(runway, aircraft_type);
    }
}

/// Separation-propagating cost evaluator.
#[derive(Debug, Clone)]
pub struct TimelineEvaluator {
    airport: Arc<Airport>,
    costs: CostConfig,
    policy: RunwayPolicy,
}

impl TimelineEvaluator {
    /// Creates a search-mode evaluator.
    pub fn new(airport: Arc<Airport>, costs: CostConfig) -> Self {
        Self {
            airport,
            costs,
            policy: RunwayPolicy::Assigned,
        }
    }

    /// Sets the runway policy.
    pub fn with_policy(mut self, policy: RunwayPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    pub fn costs(&self) -> &CostConfig {
        &self.costs
    }

    /// Propagates separation, writes arrival, holding and cost into every
    /// gene, and stores the total as the chromosome's fitness.
    pub fn evaluate_chromosome(&self, chromosome: &mut ScheduleChromosome) -> f64 {
        let runways = &self.airport.runways;
        let mut timeline = Timeline::new(runways.len());

        for gene in chromosome.genes.iter_mut() {
            gene.reset_evaluation();
            if self.policy == RunwayPolicy::WindRule {
                if let Some(runway) = self.wind_rule_runway(&mut timeline) {
                    gene.runway = runway;
                }
            }

            let Some(runway) = runways.get(gene.runway) else {
                gene.arrival_s = timeline.now();
                gene.cost = self.costs.infeasible_cost;
                continue;
            };

            self.advance(&mut timeline, gene, runway);
            gene.cost = self.landing_cost(gene, runway);
        }

        let fitness = chromosome.genes.iter().map(|g| g.cost).sum();
        chromosome.fitness = fitness;
        fitness
    }

    fn advance(&self, timeline: &mut Timeline, gene: &mut Gene, runway: &Runway) {
        let own = gene.runway;
        let own_type = gene.flight.aircraft_type();
        let travel = gene.flight.travel_time_s(runway, gene.speed);

        let Some(leader) = timeline.leader else {
            timeline.clocks.fill(travel);
            timeline.record_leader(own, own_type);
            gene.arrival_s = travel;
            return;
        };

        let leading_type = timeline.last_type.get(&leader).copied().unwrap_or(own_type);
        let leading_id = &self.airport.runways[leader].id;
        let sep = runway.required_separation(leading_id, leading_type, own_type);
        let earliest = travel - timeline.clocks[own];

        let increment = if sep >= earliest {
            gene.wait_s = Some(sep - earliest);
            sep
        } else {
            earliest
        };
        // one shared sequencing clock: every runway advances together
        timeline.clocks.iter_mut().for_each(|c| *c += increment);
        gene.arrival_s = timeline.clocks[own];

        if self.costs.sequencing_clock == SequencingClock::PreviousLanding {
            timeline.record_leader(own, own_type);
        }
    }

    fn wind_rule_runway(&self, timeline: &mut Timeline) -> Option<usize> {
        let mut candidates = self.airport.active_runways(timeline.now());
        if candidates.is_empty() {
            candidates = (0..self.airport.runway_count()).collect();
        }
        if candidates.is_empty() {
            return None;
        }
        let runway = candidates[timeline.rotation % candidates.len()];
        timeline.rotation += 1;
        Some(runway)
    }

    /// Cost of one landing whose arrival is already known.
    fn landing_cost(&self, gene: &Gene, runway: &Runway) -> f64 {
        let c = &self.costs;
        let flight = &gene.flight;
        if !runway.permits(flight.aircraft_type()) {
            return c.infeasible_cost;
        }

        let holding = gene.wait_s.map_or(0.0, |w| w * c.fuel_rate);

        let delay = gene.delay_s();
        let deviation = if delay.abs() <= c.schedule_tolerance_s {
            0.0
        } else if delay > 0.0 {
            let emergency = if flight.emergency { c.emergency_multiplier } else { 0.0 };
            c.crew_rate * (delay / 60.0) * (1.0 + emergency)
        } else {
            (c.pilot_rate + c.fuel_rate) * (-delay / 60.0)
        };

        let buffer = flight.next_departure_s - gene.arrival_s;
        let turnaround = if buffer >= c.turnaround_buffer_s {
            0.0
        } else {
            let shortfall_min = (c.turnaround_buffer_s - buffer) / 60.0;
            c.turnaround_rate * flight.aircraft.passengers as f64 * shortfall_min
        };

        let wind = if self.airport.wind.is_active(runway.wind_group, gene.arrival_s) {
            0.0
        } else {
            c.wind_penalty
        };

        let total = holding + deviation + turnaround + wind;
        if total.is_finite() { total } else { c.infeasible_cost }
    }
}

impl Evaluate for TimelineEvaluator {
    fn evaluate(&self, chromosome: &mut ScheduleChromosome) -> f64 {
        self.evaluate_chromosome(chromosome)
    }
}
