//! Evolution driver.
//!
//! Runs the generational loop as an explicit state machine:
//!
//! ```text
//! Seeding → Evaluating → Selecting → Recombining → Mutating → Evaluating
//!              ↑                                                  ↓
//!              └──────────── (next generation) ←──────────── Reinserting
//!                                                                 ↓
//!                                                            Terminated
//! ```
//!
//! Termination is time-bounded: the driver returns the best schedule found
//! within the configured wall-clock budget. A generation cap and a
//! cooperative cancel flag can end the run earlier; the best-so-far result
//! is valid at every point.
//!
//! Each run wraps the snapshot and the evaluation, crossover and mutation
//! operators in a [`LandingProblem`], so the phases go through the same
//! `u_metaheur::ga::GaProblem` implementation the generic engine uses.
//! Selection and reinsertion stay here: elitist backfill between a minimum
//! and a maximum population size is specific to this driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use u_metaheur::ga::GaProblem;

use super::operators::{
    ElitistReinsertion, EliteSelection, Evaluate, LandingMutation, Perturb, PrefixCrossover,
    Recombine, Reinsert, Select, rank,
};
use super::{CostConfig, GaConfig, LandingProblem, ScheduleChromosome, TimelineEvaluator};
use crate::error::{Result, SchedulingError};
use crate::models::Airport;
use crate::radar::{FlightRadar, FlightSnapshot};
use crate::scheduler::FifoScheduler;

/// Generations between progress log lines.
const LOG_EVERY: usize = 100;

/// Phase of the evolution loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaPhase {
    Seeding,
    Evaluating,
    Selecting,
    Recombining,
    Mutating,
    Reinserting,
    Terminated,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TimeBudget,
    MaxGenerations,
    Cancelled,
}

/// Outcome of a scheduling run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Lowest-cost schedule found.
    pub best: ScheduleChromosome,
    /// FIFO baseline for the same snapshot.
    pub baseline: ScheduleChromosome,
    /// Completed generations.
    pub generations: usize,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
    pub stop_reason: StopReason,
    /// Best fitness after seeding and after each generation.
    pub history: Vec<f64>,
}

impl GaResult {
    /// Cost saved against the FIFO baseline (positive = better).
    pub fn improvement(&self) -> f64 {
        self.baseline.fitness - self.best.fitness
    }
}

/// Mutable state of one run.
struct Generation {
    population: Vec<ScheduleChromosome>,
    parents: Vec<ScheduleChromosome>,
    offspring: Vec<ScheduleChromosome>,
    best: Option<ScheduleChromosome>,
    history: Vec<f64>,
    count: usize,
}

impl Generation {
    fn new() -> Self {
        Self {
            population: Vec::new(),
            parents: Vec::new(),
            offspring: Vec::new(),
            best: None,
            history: Vec::new(),
            count: 0,
        }
    }

    /// Records the population leader if it beats the best so far.
    fn track_best(&mut self) {
        if let Some(leader) = self.population.first() {
            let improved = self.best.as_ref().is_none_or(|b| leader.fitness < b.fitness);
            if improved {
                self.best = Some(leader.clone());
            }
        }
        if let Some(best) = &self.best {
            self.history.push(best.fitness);
        }
    }
}

/// Genetic algorithm driver for landing schedules.
///
/// Generic over the five operator roles; [`GaRunner::new`] wires the
/// defaults and the `with_*` methods swap individual strategies.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use u_landing::ga::{CostConfig, GaConfig, GaRunner};
/// use u_landing::models::Airport;
/// use u_landing::radar::FlightSnapshot;
///
/// let airport = Arc::new(Airport::new("LPPT"));
/// let snapshot = FlightSnapshot::default();
/// let runner = GaRunner::new(airport, CostConfig::default(), GaConfig::default());
/// let result = runner.run(&snapshot);
/// ```
pub struct GaRunner<
    E = TimelineEvaluator,
    S = EliteSelection,
    X = PrefixCrossover,
    M = LandingMutation,
    I = ElitistReinsertion,
> {
    config: GaConfig,
    runway_count: usize,
    evaluator: E,
    selection: S,
    crossover: X,
    mutation: M,
    reinsertion: I,
    baseline: FifoScheduler,
    cancelled: Arc<AtomicBool>,
}

impl GaRunner {
    /// Creates a driver with the default operators.
    pub fn new(airport: Arc<Airport>, costs: CostConfig, config: GaConfig) -> Self {
        Self {
            runway_count: airport.runway_count(),
            evaluator: TimelineEvaluator::new(Arc::clone(&airport), costs.clone()),
            selection: EliteSelection,
            crossover: PrefixCrossover,
            mutation: LandingMutation::new(config.mutation_rate),
            reinsertion: ElitistReinsertion,
            baseline: FifoScheduler::new(airport, costs),
            cancelled: Arc::new(AtomicBool::new(false)),
            config,
        }
    }
}

impl<E, S, X, M, I> GaRunner<E, S, X, M, I>
where
    E: Evaluate + Clone + Send,
    S: Select,
    X: Recombine + Clone + Send + Sync,
    M: Perturb + Clone + Send + Sync,
    I: Reinsert,
{
    /// Replaces the fitness evaluator.
    pub fn with_evaluator<E2: Evaluate + Clone + Send>(self, evaluator: E2) -> GaRunner<E2, S, X, M, I> {
        GaRunner {
            config: self.config,
            runway_count: self.runway_count,
            evaluator,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            reinsertion: self.reinsertion,
            baseline: self.baseline,
            cancelled: self.cancelled,
        }
    }

    /// Replaces the selection strategy.
    pub fn with_selection<S2: Select>(self, selection: S2) -> GaRunner<E, S2, X, M, I> {
        GaRunner {
            config: self.config,
            runway_count: self.runway_count,
            evaluator: self.evaluator,
            selection,
            crossover: self.crossover,
            mutation: self.mutation,
            reinsertion: self.reinsertion,
            baseline: self.baseline,
            cancelled: self.cancelled,
        }
    }

    /// Replaces the crossover strategy.
    pub fn with_crossover<X2: Recombine + Clone + Send + Sync>(self, crossover: X2) -> GaRunner<E, S, X2, M, I> {
        GaRunner {
            config: self.config,
            runway_count: self.runway_count,
            evaluator: self.evaluator,
            selection: self.selection,
            crossover,
            mutation: self.mutation,
            reinsertion: self.reinsertion,
            baseline: self.baseline,
            cancelled: self.cancelled,
        }
    }

    /// Replaces the mutation strategy.
    pub fn with_mutation<M2: Perturb + Clone + Send + Sync>(self, mutation: M2) -> GaRunner<E, S, X, M2, I> {
        GaRunner {
            config: self.config,
            runway_count: self.runway_count,
            evaluator: self.evaluator,
            selection: self.selection,
            crossover: self.crossover,
            mutation,
            reinsertion: self.reinsertion,
            baseline: self.baseline,
            cancelled: self.cancelled,
        }
    }

    /// Replaces the reinsertion strategy.
    pub fn with_reinsertion<I2: Reinsert>(self, reinsertion: I2) -> GaRunner<E, S, X, M, I2> {
        GaRunner {
            config: self.config,
            runway_count: self.runway_count,
            evaluator: self.evaluator,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            reinsertion,
            baseline: self.baseline,
            cancelled: self.cancelled,
        }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Handle that stops the run after the current phase when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Waits for the radar to become ready, then schedules its snapshot.
    pub fn run_from_radar(&self, radar: &FlightRadar, wait: Duration) -> Result<GaResult> {
        if !radar.wait_ready(wait) {
            return Err(SchedulingError::RadarNotReady(wait));
        }
        self.run(&radar.snapshot())
    }

    /// Runs with an RNG seeded from the configuration (or OS entropy).
    pub fn run(&self, snapshot: &FlightSnapshot) -> Result<GaResult> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.run_with_rng(snapshot, &mut rng)
    }

    /// Runs with an injected RNG.
    pub fn run_with_rng<R: Rng>(&self, snapshot: &FlightSnapshot, rng: &mut R) -> Result<GaResult> {
        self.check(snapshot)?;
        let (min, max) = (self.config.min_population, self.config.max_population);
        info!(
            "landing GA: {} flights, {} runways, population {min}..{max}, budget {:?}",
            snapshot.len(),
            self.runway_count,
            self.config.time_budget
        );

        let problem = LandingProblem::from_parts(
            snapshot.clone(),
            self.runway_count,
            self.evaluator.clone(),
            self.crossover.clone(),
            self.mutation.clone(),
        );
        let crossover_rate = probability(self.config.crossover_rate);
        let start = Instant::now();
        let mut state = Generation::new();
        let mut phase = GaPhase::Seeding;
        let mut stop_reason = StopReason::TimeBudget;

        while phase != GaPhase::Terminated {
            phase = match phase {
                GaPhase::Seeding => {
                    state.offspring = (0..min).map(|_| problem.create_individual(rng)).collect();
                    GaPhase::Evaluating
                }
                GaPhase::Evaluating => {
                    problem.evaluate_population(&mut state.offspring, self.config.parallel);
                    if state.population.is_empty() {
                        state.population = std::mem::take(&mut state.offspring);
                        rank(&mut state.population);
                        state.track_best();
                        self.next_or_stop(start, state.count, &mut stop_reason)
                    } else {
                        GaPhase::Reinserting
                    }
                }
                GaPhase::Selecting => {
                    state.parents = self.selection.select(&state.population, min);
                    GaPhase::Recombining
                }
                GaPhase::Recombining => {
                    state.offspring.clear();
                    for pair in state.parents.chunks_exact(2) {
                        if rng.random_bool(crossover_rate) {
                            let children = problem.crossover(&pair[0], &pair[1], rng);
                            state.offspring.extend(children);
                        }
                    }
                    GaPhase::Mutating
                }
                GaPhase::Mutating => {
                    for child in &mut state.offspring {
                        problem.mutate(child, rng);
                    }
                    GaPhase::Evaluating
                }
                GaPhase::Reinserting => {
                    let offspring = std::mem::take(&mut state.offspring);
                    let mut next = self.reinsertion.reinsert(offspring, &state.parents, min);
                    rank(&mut next);
                    next.truncate(max);
                    state.population = next;
                    state.count += 1;
                    state.track_best();

                    if state.count % LOG_EVERY == 0 {
                        debug!(
                            "generation {}: best {:.2}, population {}",
                            state.count,
                            state.history.last().copied().unwrap_or(f64::INFINITY),
                            state.population.len()
                        );
                    }
                    self.next_or_stop(start, state.count, &mut stop_reason)
                }
                GaPhase::Terminated => GaPhase::Terminated,
            };
        }

        let elapsed = start.elapsed();
        let best = state
            .best
            .take()
            .unwrap_or_else(|| ScheduleChromosome::from_genes(Vec::new()));
        let baseline = self.baseline.schedule(snapshot);
        info!(
            "landing GA finished ({stop_reason:?}) after {} generations in {elapsed:?}: best {:.2}, FIFO {:.2}",
            state.count, best.fitness, baseline.fitness
        );

        Ok(GaResult {
            best,
            baseline,
            generations: state.count,
            elapsed,
            stop_reason,
            history: state.history,
        })
    }

    fn check(&self, snapshot: &FlightSnapshot) -> Result<()> {
        if snapshot.is_empty() {
            return Err(SchedulingError::EmptySnapshot);
        }
        if self.runway_count == 0 {
            return Err(SchedulingError::NoRunways);
        }
        let (min, max) = (self.config.min_population, self.config.max_population);
        if min < 2 || min > max {
            return Err(SchedulingError::InvalidPopulation { min, max });
        }
        Ok(())
    }

    fn next_or_stop(&self, start: Instant, generations: usize, reason: &mut StopReason) -> GaPhase {
        match self.stop_reason(start, generations) {
            Some(r) => {
                *reason = r;
                GaPhase::Terminated
            }
            None => GaPhase::Selecting,
        }
    }

    fn stop_reason(&self, start: Instant, generations: usize) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            Some(StopReason::Cancelled)
        } else if self.config.max_generations.is_some_and(|g| generations >= g) {
            Some(StopReason::MaxGenerations)
        } else if start.elapsed() >= self.config.time_budget {
            Some(StopReason::TimeBudget)
        } else {
            None
        }
    }
}

/// Clamps a configured rate into `[0, 1]`; NaN disables the operator.
fn probability(rate: f64) -> f64 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}
