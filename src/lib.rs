//! Runway landing scheduler.
//!
//! Sequences inbound flights onto an airport's runways with a genetic
//! algorithm, minimizing the economic cost of holding, schedule deviation
//! and missed turnarounds under wake-turbulence separation, runway
//! permissions and the time-of-day wind configuration.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `AircraftProfile`, `FlightContact`, `Runway`,
//!   `SeparationMatrix`, `Airport`, `WindSchedule`
//! - **`radar`**: Concurrent flight table fed by the approach radar and the
//!   frozen `FlightSnapshot` a run works on
//! - **`ga`**: Chromosome encoding, timeline evaluator, operators and the
//!   time-bounded evolution driver
//! - **`scheduler`**: FIFO baseline and schedule KPIs
//! - **`validation`**: Configuration integrity checks (duplicate IDs, unknown
//!   runway references, speed envelopes)
//! - **`error`**: Errors that prevent a run from starting
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use u_landing::ga::{CostConfig, GaConfig, GaRunner};
//! use u_landing::models::{AircraftProfile, AircraftType, Airport, FlightContact, Runway, WindGroup};
//! use u_landing::radar::FlightSnapshot;
//!
//! let airport = Arc::new(
//!     Airport::new("LPPT")
//!         .with_runway(Runway::new("03", WindGroup::A))
//!         .with_runway(Runway::new("35", WindGroup::A)),
//! );
//! let a320 = Arc::new(AircraftProfile::new("A320", AircraftType::Medium, 140.0).with_passengers(150));
//! let snapshot = FlightSnapshot::new((0..5).map(|i| {
//!     FlightContact::new(format!("TP{i}"), a320.clone())
//!         .with_runway_distance("03", 20.0 + i as f64)
//!         .with_runway_distance("35", 22.0 + i as f64)
//!         .with_desired_landing(600.0 + 60.0 * i as f64)
//! }));
//!
//! let config = GaConfig::default()
//!     .with_time_budget(Duration::from_millis(200))
//!     .with_seed(7);
//! let result = GaRunner::new(airport, CostConfig::default(), config)
//!     .run(&snapshot)
//!     .unwrap();
//! assert_eq!(result.best.len(), 5);
//! ```
//!
//! # References
//!
//! - Beasley et al. (2000), "Scheduling aircraft landings: the static case"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - ICAO Doc 4444 (PANS-ATM), Ch. 8: Separation methods and minima

pub mod error;
pub mod ga;
pub mod models;
pub mod radar;
pub mod scheduler;
pub mod validation;

pub use error::SchedulingError;
