//! Landing-sequence chromosome.
//!
//! # Encoding
//!
//! A chromosome is an ordered list of [`Gene`]s, one per flight of the
//! snapshot. Gene order is landing order; each gene carries the runway
//! and speed decision for its flight.
//!
//! # Invariant
//! Every flight of the snapshot appears exactly once. All structural
//! operations preserve this; [`ScheduleChromosome::is_valid`] checks it.

use std::collections::HashSet;

use rand::Rng;
use u_metaheur::ga::Individual;

use super::Gene;
use crate::models::SpeedProfile;
use crate::radar::FlightSnapshot;

/// Candidate landing schedule.
///
/// Lower fitness = better schedule (minimization convention).
/// `f64::INFINITY` marks a chromosome that has not been evaluated.
#[derive(Debug, Clone)]
pub struct ScheduleChromosome {
    /// Landing sequence.
    pub genes: Vec<Gene>,
    /// Total cost (lower = better).
    pub fitness: f64,
}

impl Individual for ScheduleChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl ScheduleChromosome {
    /// Creates a search chromosome: random runways, optimal speed, ordered
    /// by each flight's next-departure deadline.
    pub fn random<R: Rng>(snapshot: &FlightSnapshot, runway_count: usize, rng: &mut R) -> Self {
        let mut chromosome = Self::fifo(snapshot, runway_count, rng);
        chromosome
            .genes
            .sort_by(|a, b| a.flight.next_departure_s.total_cmp(&b.flight.next_departure_s));
        chromosome
    }

    /// Creates a chromosome in snapshot admission order with random runways.
    pub fn fifo<R: Rng>(snapshot: &FlightSnapshot, runway_count: usize, rng: &mut R) -> Self {
        let genes = snapshot
            .iter()
            .map(|flight| {
                let runway = if runway_count == 0 {
                    0
                } else {
                    rng.random_range(0..runway_count)
                };
                Gene::new(flight.clone(), runway, SpeedProfile::default())
            })
            .collect();
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Builds an unevaluated chromosome from existing genes.
    pub fn from_genes(mut genes: Vec<Gene>) -> Self {
        genes.iter_mut().for_each(Gene::reset_evaluation);
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Marks the fitness as stale.
    #[inline]
    pub fn invalidate(&mut self) {
        self.fitness = f64::INFINITY;
    }

    /// Exchanges two landing positions.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.genes.swap(i, j);
        self.invalidate();
    }

    /// Copies the genes in `[start, end)`, clamped to the chromosome length.
    pub fn slice(&self, start: usize, end: usize) -> Vec<Gene> {
        let end = end.min(self.genes.len());
        let start = start.min(end);
        self.genes[start..end].to_vec()
    }

    /// Returns a new chromosome with `donor` spliced in front.
    ///
    /// Genes of this chromosome whose flight appears in `donor` are dropped,
    /// so a donor built from a same-snapshot chromosome keeps the length.
    pub fn prepend_genes(&self, donor: Vec<Gene>) -> Self {
        let donated: HashSet<&str> = donor.iter().map(Gene::flight_id).collect();
        let rest: Vec<Gene> = self
            .genes
            .iter()
            .filter(|g| !donated.contains(g.flight_id()))
            .cloned()
            .collect();

        let mut genes = donor;
        genes.extend(rest);
        Self::from_genes(genes)
    }

    /// Flight IDs in landing order.
    pub fn flight_ids(&self) -> Vec<&str> {
        self.genes.iter().map(Gene::flight_id).collect()
    }

    /// Latest realized landing time (s).
    pub fn max_arrival_s(&self) -> f64 {
        self.genes.iter().map(|g| g.arrival_s).fold(0.0, f64::max)
    }

    /// Validates the chromosome against its snapshot.
    ///
    /// Checks that every snapshot flight appears exactly once and that
    /// every runway index is in range.
    pub fn is_valid(&self, snapshot: &FlightSnapshot, runway_count: usize) -> bool {
        if self.genes.len() != snapshot.len() {
            return false;
        }

        let mut seen = HashSet::with_capacity(self.genes.len());
        for gene in &self.genes {
            if !seen.insert(gene.flight_id()) || gene.runway >= runway_count {
                return false;
            }
        }

        snapshot.iter().all(|c| seen.contains(c.flight_id.as_str()))
    }
}
