//! Genetic operators for landing schedules.
//!
//! Each role of the evolution loop is a one-method trait so that
//! [`GaRunner`](super::GaRunner) is parametrized over strategies:
//!
//! | Role | Trait | Default |
//! |------|-------|---------|
//! | Fitness | [`Evaluate`] | [`TimelineEvaluator`](super::TimelineEvaluator) |
//! | Selection | [`Select`] | [`EliteSelection`] |
//! | Crossover | [`Recombine`] | [`PrefixCrossover`] |
//! | Mutation | [`Perturb`] | [`LandingMutation`] |
//! | Reinsertion | [`Reinsert`] | [`ElitistReinsertion`] |
//!
//! Every stochastic choice draws from the `rng` passed in by the caller.

use rand::Rng;

use super::ScheduleChromosome;
use crate::models::SpeedProfile;

/// Scores a chromosome, writing per-gene timing and cost.
pub trait Evaluate: Sync {
    /// Evaluates `chromosome` in place and returns its fitness.
    fn evaluate(&self, chromosome: &mut ScheduleChromosome) -> f64;
}

/// Picks parents from a population.
pub trait Select {
    fn select(&self, population: &[ScheduleChromosome], count: usize) -> Vec<ScheduleChromosome>;
}

/// Produces children from two parents.
pub trait Recombine {
    fn recombine<R: Rng>(
        &self,
        parent1: &ScheduleChromosome,
        parent2: &ScheduleChromosome,
        rng: &mut R,
    ) -> Vec<ScheduleChromosome>;
}

/// Perturbs a chromosome in place.
pub trait Perturb {
    fn perturb<R: Rng>(&self, chromosome: &mut ScheduleChromosome, runway_count: usize, rng: &mut R);
}

/// Merges offspring and parents into the next population.
pub trait Reinsert {
    fn reinsert(
        &self,
        offspring: Vec<ScheduleChromosome>,
        parents: &[ScheduleChromosome],
        min_size: usize,
    ) -> Vec<ScheduleChromosome>;
}

/// Sorts chromosomes by ascending fitness (best first).
pub fn rank(population: &mut [ScheduleChromosome]) {
    population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
}

// ======================== Selection ========================

/// Elite selection: the `count` lowest-cost chromosomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EliteSelection;

impl Select for EliteSelection {
    fn select(&self, population: &[ScheduleChromosome], count: usize) -> Vec<ScheduleChromosome> {
        let mut ranked = population.to_vec();
        rank(&mut ranked);
        ranked.truncate(count);
        ranked
    }
}

// ======================== Crossover ========================

/// Prefix crossover.
///
/// Picks a cut `c` in `[0, N)`; each child is one parent with the other
/// parent's first `c` genes spliced in front, duplicates removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixCrossover;

impl PrefixCrossover {
    /// Crossover at an explicit cut index (`0..=N`).
    pub fn recombine_at(
        &self,
        parent1: &ScheduleChromosome,
        parent2: &ScheduleChromosome,
        cut: usize,
    ) -> (ScheduleChromosome, ScheduleChromosome) {
        let child1 = parent1.prepend_genes(parent2.slice(0, cut));
        let child2 = parent2.prepend_genes(parent1.slice(0, cut));
        (child1, child2)
    }
}

impl Recombine for PrefixCrossover {
    fn recombine<R: Rng>(
        &self,
        parent1: &ScheduleChromosome,
        parent2: &ScheduleChromosome,
        rng: &mut R,
    ) -> Vec<ScheduleChromosome> {
        let n = parent1.len();
        if n == 0 || n != parent2.len() {
            return vec![parent1.clone(), parent2.clone()];
        }
        let cut = rng.random_range(0..n);
        let (c1, c2) = self.recombine_at(parent1, parent2, cut);
        vec![c1, c2]
    }
}

// ======================== Mutation ========================

/// Landing mutation.
///
/// With probability `probability`, applies all three of:
/// [`sequence_mutation`], [`runway_mutation`] and [`speed_mutation`].
#[derive(Debug, Clone, Copy)]
pub struct LandingMutation {
    probability: f64,
}

impl LandingMutation {
    /// Creates the operator; the probability is clamped into `[0, 1]` and
    /// NaN disables it.
    pub fn new(probability: f64) -> Self {
        Self {
            probability: if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) },
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for LandingMutation {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Perturb for LandingMutation {
    fn perturb<R: Rng>(&self, chromosome: &mut ScheduleChromosome, runway_count: usize, rng: &mut R) {
        if chromosome.is_empty() || !rng.random_bool(self.probability) {
            return;
        }
        sequence_mutation(chromosome, rng);
        runway_mutation(chromosome, runway_count, rng);
        speed_mutation(chromosome, rng);
    }
}

/// Swaps a random gene with one of its neighbours.
pub fn sequence_mutation<R: Rng>(chromosome: &mut ScheduleChromosome, rng: &mut R) {
    let len = chromosome.len();
    if len < 2 {
        return;
    }
    let i = rng.random_range(0..len);
    let j = if i == 0 {
        1
    } else if i == len - 1 {
        i - 1
    } else if rng.random_bool(0.5) {
        i - 1
    } else {
        i + 1
    };
    chromosome.swap(i, j);
}

/// Moves a random gene to a different runway.
///
/// Permissions are not checked; the evaluator penalizes infeasible choices.
pub fn runway_mutation<R: Rng>(chromosome: &mut ScheduleChromosome, runway_count: usize, rng: &mut R) {
    if chromosome.is_empty() || runway_count < 2 {
        return;
    }
    let idx = rng.random_range(0..chromosome.len());
    let current = chromosome.genes[idx].runway;
    // draw among the other runways
    let mut runway = rng.random_range(0..runway_count - 1);
    if runway >= current {
        runway += 1;
    }
    chromosome.genes[idx].runway = runway;
    chromosome.invalidate();
}

/// Gives a random gene a different speed profile.
pub fn speed_mutation<R: Rng>(chromosome: &mut ScheduleChromosome, rng: &mut R) {
    if chromosome.is_empty() {
        return;
    }
    let idx = rng.random_range(0..chromosome.len());
    let current = chromosome.genes[idx].speed;
    let others: Vec<SpeedProfile> = SpeedProfile::ALL.into_iter().filter(|s| *s != current).collect();
    chromosome.genes[idx].speed = others[rng.random_range(0..others.len())];
    chromosome.invalidate();
}

// ======================== Reinsertion ========================

/// Elitist reinsertion.
///
/// Keeps every offspring; when there are fewer than `min_size`, fills the
/// gap with the best-ranked parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElitistReinsertion;

impl Reinsert for ElitistReinsertion {
    fn reinsert(
        &self,
        mut offspring: Vec<ScheduleChromosome>,
        parents: &[ScheduleChromosome],
        min_size: usize,
    ) -> Vec<ScheduleChromosome> {
        let missing = min_size.saturating_sub(offspring.len());
        if missing > 0 {
            let mut ranked = parents.to_vec();
            rank(&mut ranked);
            offspring.extend(ranked.into_iter().take(missing));
        }
        offspring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftProfile, AircraftType, FlightContact};
    use crate::radar::FlightSnapshot;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::sync::Arc;

    fn sample_snapshot(n: usize) -> FlightSnapshot {
        let b738 = Arc::new(AircraftProfile::new("B738", AircraftType::Medium, 140.0));
        FlightSnapshot::new((0..n).map(|i| FlightContact::new(format!("F{i}"), b738.clone())))
    }

    fn with_fitness(snap: &FlightSnapshot, fitness: f64, rng: &mut SmallRng) -> ScheduleChromosome {
        let mut ch = ScheduleChromosome::fifo(snap, 3, rng);
        ch.fitness = fitness;
        ch
    }

    #[test]
    fn test_elite_selection() {
        let snap = sample_snapshot(3);
        let mut rng = SmallRng::seed_from_u64(42);
        let pop: Vec<_> = [5.0, 1.0, 3.0, 2.0]
            .into_iter()
            .map(|f| with_fitness(&snap, f, &mut rng))
            .collect();

        let best = EliteSelection.select(&pop, 2);
        let fits: Vec<f64> = best.iter().map(|c| c.fitness).collect();
        assert_eq!(fits, vec![1.0, 2.0]);
        assert_eq!(EliteSelection.select(&pop, 10).len(), 4);
    }

    #[test]
    fn test_crossover_cut_bounds() {
        let snap = sample_snapshot(6);
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = ScheduleChromosome::random(&snap, 3, &mut rng);
        let mut p2 = ScheduleChromosome::fifo(&snap, 3, &mut rng);
        p2.genes.reverse();

        for cut in [0, 3, 6] {
            let (c1, c2) = PrefixCrossover.recombine_at(&p1, &p2, cut);
            assert!(c1.is_valid(&snap, 3), "cut {cut}");
            assert!(c2.is_valid(&snap, 3), "cut {cut}");
        }

        let (c1, _) = PrefixCrossover.recombine_at(&p1, &p2, 0);
        assert_eq!(c1.flight_ids(), p1.flight_ids());
        let (c1, c2) = PrefixCrossover.recombine_at(&p1, &p2, 6);
        assert_eq!(c1.flight_ids(), p2.flight_ids());
        assert_eq!(c2.flight_ids(), p1.flight_ids());
    }

    #[test]
    fn test_crossover_children() {
        let snap = sample_snapshot(8);
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = ScheduleChromosome::random(&snap, 3, &mut rng);
        let p2 = ScheduleChromosome::fifo(&snap, 3, &mut rng);

        for _ in 0..50 {
            let children = PrefixCrossover.recombine(&p1, &p2, &mut rng);
            assert_eq!(children.len(), 2);
            for c in &children {
                assert!(c.is_valid(&snap, 3));
                assert_eq!(c.fitness, f64::INFINITY);
            }
        }
    }

    #[test]
    fn test_crossover_over_repeated_contacts() {
        let b738 = Arc::new(AircraftProfile::new("B738", AircraftType::Medium, 140.0));
        let snap = FlightSnapshot::new(
            ["F0", "F1", "F0", "F2"].map(|id| FlightContact::new(id, b738.clone())),
        );
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = ScheduleChromosome::random(&snap, 2, &mut rng);
        let p2 = ScheduleChromosome::random(&snap, 2, &mut rng);

        for cut in 0..=snap.len() {
            let (c1, c2) = PrefixCrossover.recombine_at(&p1, &p2, cut);
            assert_eq!(c1.len(), 3);
            assert!(c1.is_valid(&snap, 2));
            assert!(c2.is_valid(&snap, 2));
        }
    }

    #[test]
    fn test_crossover_prefix_inherits_decisions() {
        let snap = sample_snapshot(4);
        let mut rng = SmallRng::seed_from_u64(3);
        let p1 = ScheduleChromosome::fifo(&snap, 3, &mut rng);
        let mut p2 = ScheduleChromosome::fifo(&snap, 3, &mut rng);
        p2.genes.reverse();
        p2.genes[0].speed = SpeedProfile::Max;

        let (c1, _) = PrefixCrossover.recombine_at(&p1, &p2, 1);
        assert_eq!(c1.flight_ids(), vec!["F3", "F0", "F1", "F2"]);
        assert_eq!(c1.genes[0].speed, SpeedProfile::Max);
        assert_eq!(c1.genes[0].runway, p2.genes[0].runway);
    }

    #[test]
    fn test_sequence_mutation_swaps_neighbours() {
        let snap = sample_snapshot(5);
        let mut rng = SmallRng::seed_from_u64(42);
        let original = ScheduleChromosome::fifo(&snap, 3, &mut rng);

        for _ in 0..50 {
            let mut ch = original.clone();
            sequence_mutation(&mut ch, &mut rng);
            let moved: Vec<usize> = (0..5)
                .filter(|&i| ch.genes[i].flight_id() != original.genes[i].flight_id())
                .collect();
            assert_eq!(moved.len(), 2);
            assert_eq!(moved[1] - moved[0], 1);
            assert!(ch.is_valid(&snap, 3));
        }
    }

    #[test]
    fn test_runway_and_speed_mutation_always_change() {
        let snap = sample_snapshot(1);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = ScheduleChromosome::fifo(&snap, 3, &mut rng);

        for _ in 0..50 {
            let (runway, speed) = (ch.genes[0].runway, ch.genes[0].speed);
            runway_mutation(&mut ch, 3, &mut rng);
            speed_mutation(&mut ch, &mut rng);
            assert_ne!(ch.genes[0].runway, runway);
            assert!(ch.genes[0].runway < 3);
            assert_ne!(ch.genes[0].speed, speed);
        }
    }

    #[test]
    fn test_runway_mutation_single_runway_noop() {
        let snap = sample_snapshot(3);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ch = ScheduleChromosome::fifo(&snap, 1, &mut rng);
        runway_mutation(&mut ch, 1, &mut rng);
        assert!(ch.genes.iter().all(|g| g.runway == 0));
    }

    #[test]
    fn test_landing_mutation_probability() {
        let snap = sample_snapshot(4);
        let mut rng = SmallRng::seed_from_u64(42);
        let original = with_fitness(&snap, 1.0, &mut rng);

        let mut ch = original.clone();
        LandingMutation::new(0.0).perturb(&mut ch, 3, &mut rng);
        assert_eq!(ch.fitness, 1.0);
        assert_eq!(ch.flight_ids(), original.flight_ids());

        let mut ch = original.clone();
        LandingMutation::new(1.0).perturb(&mut ch, 3, &mut rng);
        assert!(!ch.is_evaluated());
        assert_ne!(ch.flight_ids(), original.flight_ids());
        assert!(ch.is_valid(&snap, 3));
    }

    #[test]
    fn test_landing_mutation_probability_is_clamped() {
        assert_eq!(LandingMutation::new(1.5).probability(), 1.0);
        assert_eq!(LandingMutation::new(-0.2).probability(), 0.0);
        assert_eq!(LandingMutation::new(f64::NAN).probability(), 0.0);
        assert_eq!(LandingMutation::default().probability(), 0.1);

        // out-of-range rates must not reach random_bool
        let snap = sample_snapshot(4);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = with_fitness(&snap, 1.0, &mut rng);
        LandingMutation::new(7.0).perturb(&mut ch, 3, &mut rng);
        assert!(!ch.is_evaluated());
        let mut ch = with_fitness(&snap, 1.0, &mut rng);
        LandingMutation::new(f64::NAN).perturb(&mut ch, 3, &mut rng);
        assert!(ch.is_evaluated());
    }

    #[test]
    fn test_reinsertion_backfills_best_parents() {
        let snap = sample_snapshot(3);
        let mut rng = SmallRng::seed_from_u64(42);
        let parents: Vec<_> = [4.0, 1.0, 3.0, 2.0]
            .into_iter()
            .map(|f| with_fitness(&snap, f, &mut rng))
            .collect();
        let offspring = vec![with_fitness(&snap, 5.0, &mut rng)];

        let next = ElitistReinsertion.reinsert(offspring, &parents, 3);
        let fits: Vec<f64> = next.iter().map(|c| c.fitness).collect();
        assert_eq!(fits, vec![5.0, 1.0, 2.0]);
        // backfilled parents are no worse than the worst offspring
        assert!(next[1..].iter().all(|p| p.fitness <= 5.0));
    }

    #[test]
    fn test_reinsertion_keeps_enough_offspring() {
        let snap = sample_snapshot(3);
        let mut rng = SmallRng::seed_from_u64(42);
        let parents = vec![with_fitness(&snap, 0.5, &mut rng)];
        let offspring: Vec<_> = (0..3).map(|i| with_fitness(&snap, i as f64, &mut rng)).collect();

        let next = ElitistReinsertion.reinsert(offspring, &parents, 3);
        assert_eq!(next.len(), 3);
        assert!(next.iter().all(|c| c.fitness != 0.5));
    }
}
