//! Landing GA problem definition.
//!
//! Implements `u_metaheur::ga::GaProblem` for runway landing sequencing.
//! Bridges a frozen [`FlightSnapshot`] and the landing operators to the
//! generic GA framework. [`GaRunner`](super::GaRunner) drives the same
//! problem through its time-bounded loop.
//!
//! # Reference
//! Beasley et al. (2000), "Scheduling aircraft landings: the static case"

use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;
use u_metaheur::ga::GaProblem;

use super::operators::{Evaluate, LandingMutation, Perturb, PrefixCrossover, Recombine};
use super::{CostConfig, ScheduleChromosome, TimelineEvaluator};
use crate::models::Airport;
use crate::radar::FlightSnapshot;

/// GA problem definition for one landing snapshot.
///
/// Creates random landing sequences and scores them with the timeline
/// evaluator.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use u_landing::ga::{CostConfig, LandingProblem};
/// use u_landing::models::Airport;
/// use u_landing::radar::FlightSnapshot;
/// use u_metaheur::ga::{GaConfig, GaRunner};
///
/// let airport = Arc::new(Airport::new("LPPT"));
/// let snapshot = FlightSnapshot::default();
/// let problem = LandingProblem::new(snapshot, airport, CostConfig::default());
/// let config = GaConfig::default();
/// let result = GaRunner::run(&problem, &config);
/// ```
#[derive(Debug, Clone)]
pub struct LandingProblem<E = TimelineEvaluator, X = PrefixCrossover, M = LandingMutation> {
    snapshot: FlightSnapshot,
    runway_count: usize,
    evaluator: E,
    crossover: X,
    mutation: M,
}

impl LandingProblem {
    /// Creates a problem with the default operators.
    ///
    /// Mutation always fires once invoked; the engine decides how often to
    /// invoke it.
    pub fn new(snapshot: FlightSnapshot, airport: Arc<Airport>, costs: CostConfig) -> Self {
        Self {
            snapshot,
            runway_count: airport.runway_count(),
            evaluator: TimelineEvaluator::new(airport, costs),
            crossover: PrefixCrossover,
            mutation: LandingMutation::new(1.0),
        }
    }
}

impl<E, X, M> LandingProblem<E, X, M>
where
    E: Evaluate,
    X: Recombine,
    M: Perturb,
{
    /// Assembles a problem from explicit operators.
    pub fn from_parts(
        snapshot: FlightSnapshot,
        runway_count: usize,
        evaluator: E,
        crossover: X,
        mutation: M,
    ) -> Self {
        Self {
            snapshot,
            runway_count,
            evaluator,
            crossover,
            mutation,
        }
    }

    /// Replaces the fitness evaluator.
    pub fn with_evaluator<E2: Evaluate>(self, evaluator: E2) -> LandingProblem<E2, X, M> {
        LandingProblem::from_parts(self.snapshot, self.runway_count, evaluator, self.crossover, self.mutation)
    }

    /// Replaces the crossover operator.
    pub fn with_crossover<X2: Recombine>(self, crossover: X2) -> LandingProblem<E, X2, M> {
        LandingProblem::from_parts(self.snapshot, self.runway_count, self.evaluator, crossover, self.mutation)
    }

    /// Replaces the mutation operator.
    pub fn with_mutation<M2: Perturb>(self, mutation: M2) -> LandingProblem<E, X, M2> {
        LandingProblem::from_parts(self.snapshot, self.runway_count, self.evaluator, self.crossover, mutation)
    }

    pub fn snapshot(&self) -> &FlightSnapshot {
        &self.snapshot
    }

    pub fn runway_count(&self) -> usize {
        self.runway_count
    }

    /// Evaluates `chromosome` in place, keeping per-gene timing and cost.
    pub fn evaluate_chromosome(&self, chromosome: &mut ScheduleChromosome) -> f64 {
        self.evaluator.evaluate(chromosome)
    }

    /// Evaluates every chromosome in place, on the rayon pool when `parallel`.
    pub fn evaluate_population(&self, chromosomes: &mut [ScheduleChromosome], parallel: bool) {
        // only the evaluator crosses threads
        let evaluator = &self.evaluator;
        if parallel {
            chromosomes.par_iter_mut().for_each(|c| {
                evaluator.evaluate(c);
            });
        } else {
            for c in chromosomes.iter_mut() {
                evaluator.evaluate(c);
            }
        }
    }
}

impl<E, X, M> GaProblem for LandingProblem<E, X, M>
where
    E: Evaluate + Send,
    X: Recombine + Send + Sync,
    M: Perturb + Send + Sync,
{
    type Individual = ScheduleChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> ScheduleChromosome {
        ScheduleChromosome::random(&self.snapshot, self.runway_count, rng)
    }

    fn evaluate(&self, individual: &ScheduleChromosome) -> f64 {
        let mut scored = individual.clone();
        self.evaluator.evaluate(&mut scored)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &ScheduleChromosome,
        parent2: &ScheduleChromosome,
        rng: &mut R,
    ) -> Vec<ScheduleChromosome> {
        self.crossover.recombine(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut ScheduleChromosome, rng: &mut R) {
        self.mutation.perturb(individual, self.runway_count, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftProfile, AircraftType, FlightContact, Runway, SeparationMatrix, WindGroup};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use u_metaheur::ga::{GaConfig, GaRunner};

    fn airport() -> Arc<Airport> {
        Arc::new(
            Airport::new("LPPT")
                .with_runway(
                    Runway::new("03", WindGroup::A)
                        .with_separation(SeparationMatrix::new().with_default(90.0)),
                )
                .with_runway(
                    Runway::new("35", WindGroup::A)
                        .with_separation(SeparationMatrix::new().with_default(60.0)),
                ),
        )
    }

    fn snapshot(n: usize) -> FlightSnapshot {
        let a320 = Arc::new(AircraftProfile::new("A320", AircraftType::Medium, 140.0).with_passengers(150));
        FlightSnapshot::new((0..n).map(|i| {
            FlightContact::new(format!("TP{i}"), a320.clone())
                .with_runway_distance("03", 20.0 + 3.0 * i as f64)
                .with_runway_distance("35", 22.0 + 3.0 * i as f64)
                .with_desired_landing(500.0 + 80.0 * i as f64)
        }))
    }

    fn problem(n: usize) -> LandingProblem {
        LandingProblem::new(snapshot(n), airport(), CostConfig::default())
    }

    #[test]
    fn test_create_individual() {
        let p = problem(5);
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = p.create_individual(&mut rng);
        assert!(ch.is_valid(p.snapshot(), p.runway_count()));
        assert!(!ch.is_evaluated());
    }

    #[test]
    fn test_evaluate_leaves_input_untouched() {
        let p = problem(4);
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = p.create_individual(&mut rng);

        let fitness = GaProblem::evaluate(&p, &ch);
        assert!(fitness.is_finite());
        assert!(!ch.is_evaluated());
        assert!(ch.genes.iter().all(|g| g.wait_s.is_none()));

        let mut scored = ch.clone();
        assert_eq!(p.evaluate_chromosome(&mut scored), fitness);
        assert_eq!(scored.fitness, fitness);
    }

    #[test]
    fn test_crossover_and_mutate_keep_validity() {
        let p = problem(6);
        let mut rng = SmallRng::seed_from_u64(7);
        let a = p.create_individual(&mut rng);
        let b = p.create_individual(&mut rng);

        for mut child in p.crossover(&a, &b, &mut rng) {
            p.mutate(&mut child, &mut rng);
            assert!(child.is_valid(p.snapshot(), 2));
        }
    }

    #[test]
    fn test_parallel_evaluation_matches_sequential() {
        let p = problem(6);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seq: Vec<_> = (0..8).map(|_| p.create_individual(&mut rng)).collect();
        let mut par = seq.clone();

        p.evaluate_population(&mut seq, false);
        p.evaluate_population(&mut par, true);
        for (s, q) in seq.iter().zip(&par) {
            assert!(s.is_evaluated());
            assert_eq!(s.fitness, q.fitness);
        }
    }

    #[test]
    fn test_runs_on_generic_engine() {
        let p = problem(6);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(42)
            .with_parallel(false);
        let result = GaRunner::run(&p, &config);

        assert!(result.best.is_valid(p.snapshot(), 2));
        assert!(result.best_fitness.is_finite());
        assert_eq!(result.best_fitness, GaProblem::evaluate(&p, &result.best));
    }
}
