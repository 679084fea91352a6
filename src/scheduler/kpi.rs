//! Landing schedule quality metrics (KPIs).
//!
//! Computes performance indicators from an evaluated schedule, plus a
//! delimiter-separated row format for append-only run logs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Final arrival | Latest landing time (s) |
//! | Avg delay | Mean of (arrival - desired landing), signed (s) |
//! | Avg cost | Mean per-landing cost |
//! | Total holding | Sum of separation-induced waits (s) |
//! | Infeasible | Landings costed at the infeasibility sentinel |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::ga::{CostConfig, ScheduleChromosome};

/// Schedule performance indicators.
///
/// All time values are in seconds from the snapshot epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Number of landings.
    pub flights: usize,
    /// Latest arrival (s).
    pub final_arrival_s: f64,
    /// Mean signed delay versus desired landing time (s).
    pub avg_delay_s: f64,
    /// Mean per-landing cost.
    pub avg_cost: f64,
    /// Total holding time (s).
    pub total_holding_s: f64,
    /// Total schedule cost.
    pub fitness: f64,
    /// Landings priced at the infeasibility sentinel.
    pub infeasible_landings: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from an evaluated schedule.
    ///
    /// # Arguments
    /// * `schedule` - Evaluated chromosome.
    /// * `costs` - Cost model used for the evaluation (for the sentinel).
    pub fn calculate(schedule: &ScheduleChromosome, costs: &CostConfig) -> Self {
        let n = schedule.len();
        let mut total_delay = 0.0;
        let mut total_cost = 0.0;
        let mut total_holding = 0.0;
        let mut infeasible = 0;

        for gene in &schedule.genes {
            total_delay += gene.delay_s();
            total_cost += gene.cost;
            total_holding += gene.wait_s.unwrap_or(0.0);
            if gene.cost >= costs.infeasible_cost {
                infeasible += 1;
            }
        }

        let mean = |total: f64| if n == 0 { 0.0 } else { total / n as f64 };

        Self {
            flights: n,
            final_arrival_s: schedule.max_arrival_s(),
            avg_delay_s: mean(total_delay),
            avg_cost: mean(total_cost),
            total_holding_s: total_holding,
            fitness: schedule.fitness,
            infeasible_landings: infeasible,
        }
    }

    /// Whether every landing is feasible.
    pub fn is_feasible(&self) -> bool {
        self.infeasible_landings == 0
    }

    /// Column header matching [`ScheduleKpi::to_row`].
    pub fn csv_header(sep: &str) -> String {
        [
            "label",
            "flights",
            "final_arrival_s",
            "avg_delay_s",
            "avg_cost",
            "total_holding_s",
            "fitness",
            "infeasible",
        ]
        .join(sep)
    }

    /// One log row labelled `label` (e.g. `"ga"` or `"fifo"`).
    pub fn to_row(&self, label: &str, sep: &str) -> String {
        [
            label.to_string(),
            self.flights.to_string(),
            format!("{:.1}", self.final_arrival_s),
            format!("{:.1}", self.avg_delay_s),
            format!("{:.2}", self.avg_cost),
            format!("{:.1}", self.total_holding_s),
            format!("{:.2}", self.fitness),
            self.infeasible_landings.to_string(),
        ]
        .join(sep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Gene;
    use crate::models::{AircraftProfile, AircraftType, FlightContact, SpeedProfile};
    use std::sync::Arc;

    fn gene(id: &str, desired: f64, arrival: f64, cost: f64, wait: Option<f64>) -> Gene {
        let profile = Arc::new(AircraftProfile::new("A320", AircraftType::Medium, 140.0));
        let flight = Arc::new(FlightContact::new(id, profile).with_desired_landing(desired));
        let mut g = Gene::new(flight, 0, SpeedProfile::Optimal);
        g.arrival_s = arrival;
        g.cost = cost;
        g.wait_s = wait;
        g
    }

    fn schedule(genes: Vec<Gene>) -> ScheduleChromosome {
        let fitness = genes.iter().map(|g| g.cost).sum();
        ScheduleChromosome { genes, fitness }
    }

    #[test]
    fn test_kpi_basic() {
        let s = schedule(vec![
            gene("A", 600.0, 600.0, 0.0, None),
            gene("B", 650.0, 750.0, 100.0, Some(30.0)),
            gene("C", 900.0, 840.0, 50.0, Some(0.0)),
        ]);
        let kpi = ScheduleKpi::calculate(&s, &CostConfig::default());

        assert_eq!(kpi.flights, 3);
        assert_eq!(kpi.final_arrival_s, 840.0);
        // (0 + 100 - 60) / 3
        assert!((kpi.avg_delay_s - 40.0 / 3.0).abs() < 1e-9);
        assert!((kpi.avg_cost - 50.0).abs() < 1e-9);
        assert_eq!(kpi.total_holding_s, 30.0);
        assert_eq!(kpi.fitness, 150.0);
        assert!(kpi.is_feasible());
    }

    #[test]
    fn test_kpi_counts_infeasible() {
        let costs = CostConfig::default();
        let s = schedule(vec![
            gene("A", 600.0, 600.0, costs.infeasible_cost, None),
            gene("B", 700.0, 700.0, 0.0, None),
        ]);
        let kpi = ScheduleKpi::calculate(&s, &costs);
        assert_eq!(kpi.infeasible_landings, 1);
        assert!(!kpi.is_feasible());
    }

    #[test]
    fn test_kpi_empty_schedule() {
        let kpi = ScheduleKpi::calculate(&schedule(Vec::new()), &CostConfig::default());
        assert_eq!(kpi.flights, 0);
        assert_eq!(kpi.avg_delay_s, 0.0);
        assert_eq!(kpi.avg_cost, 0.0);
    }

    #[test]
    fn test_csv_row_matches_header() {
        let s = schedule(vec![gene("A", 600.0, 612.5, 12.25, Some(2.5))]);
        let kpi = ScheduleKpi::calculate(&s, &CostConfig::default());

        let header = ScheduleKpi::csv_header(";");
        let row = kpi.to_row("ga", ";");
        assert_eq!(header.split(';').count(), row.split(';').count());
        assert_eq!(row, "ga;1;612.5;12.5;12.25;2.5;12.25;0");
    }
}
