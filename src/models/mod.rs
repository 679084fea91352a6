//! Landing domain models.
//!
//! Provides the data types describing the airspace around one airport at
//! snapshot time: aircraft performance, inbound flights, runways with their
//! separation minima, and the wind schedule. All types are immutable during
//! a scheduling run and are shared by reference across candidate schedules.
//!
//! # Units
//!
//! | Quantity | Unit |
//! |----------|------|
//! | Time | seconds after the snapshot epoch |
//! | Distance | nautical miles |
//! | Speed | knots |

mod aircraft;
mod airport;
mod flight;
mod runway;

pub use aircraft::{AircraftProfile, AircraftType, SpeedProfile};
pub use airport::{Airport, WindSchedule, WindSwitch, DAY_S};
pub use flight::{FlightContact, Location};
pub use runway::{Runway, SeparationMatrix, WindGroup};
