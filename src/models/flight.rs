//! Flight contact model.
//!
//! A flight contact is one inbound aircraft as seen by the approach radar at
//! snapshot time. It is immutable for the duration of a scheduling run.
//!
//! # Time Representation
//! All times are in seconds relative to the snapshot epoch (t=0).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::{AircraftProfile, AircraftType, Runway, SpeedProfile};

/// Mean earth radius (km).
const EARTH_RADIUS_KM: f64 = 6371.0;
/// Kilometres per nautical mile.
const KM_PER_NM: f64 = 1.852;

/// A geographic position (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance in nautical miles (haversine).
    pub fn distance_nm(&self, other: &Location) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c / KM_PER_NM
    }
}

/// An inbound flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightContact {
    /// Unique flight identifier (callsign).
    pub flight_id: String,
    /// Aircraft model flying this contact.
    pub aircraft: Arc<AircraftProfile>,
    /// Current radar position.
    pub position: Option<Location>,
    /// Precomputed distance (NM) to each runway threshold, by runway ID.
    /// Takes precedence over `position`.
    pub runway_distances: HashMap<String, f64>,
    /// Desired landing time (s).
    pub desired_landing_s: f64,
    /// Next scheduled departure of this airframe (s).
    pub next_departure_s: f64,
    /// Declared emergency.
    pub emergency: bool,
}

impl FlightContact {
    /// Creates a contact with no position and no deadlines.
    pub fn new(flight_id: impl Into<String>, aircraft: Arc<AircraftProfile>) -> Self {
        Self {
            flight_id: flight_id.into(),
            aircraft,
            position: None,
            runway_distances: HashMap::new(),
            desired_landing_s: 0.0,
            next_departure_s: f64::INFINITY,
            emergency: false,
        }
    }

    /// Sets the radar position.
    pub fn with_position(mut self, position: Location) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets a precomputed distance (NM) to a runway threshold.
    pub fn with_runway_distance(mut self, runway_id: impl Into<String>, distance_nm: f64) -> Self {
        self.runway_distances.insert(runway_id.into(), distance_nm);
        self
    }

    /// Sets the desired landing time (s).
    pub fn with_desired_landing(mut self, t_s: f64) -> Self {
        self.desired_landing_s = t_s;
        self
    }

    /// Sets the next scheduled departure (s).
    pub fn with_next_departure(mut self, t_s: f64) -> Self {
        self.next_departure_s = t_s;
        self
    }

    /// Marks the flight as an emergency.
    pub fn with_emergency(mut self, emergency: bool) -> Self {
        self.emergency = emergency;
        self
    }

    #[inline]
    pub fn aircraft_type(&self) -> AircraftType {
        self.aircraft.aircraft_type
    }

    /// Flight distance (NM) to land on `runway`, approach leg included.
    ///
    /// Unknown or malformed distances count as zero.
    pub fn distance_to(&self, runway: &Runway) -> f64 {
        let direct = match self.runway_distances.get(&runway.id) {
            Some(&d) => d,
            None => match (self.position, runway.location) {
                (Some(from), Some(to)) => from.distance_nm(&to),
                _ => 0.0,
            },
        };
        sanitize(direct) + sanitize(runway.approach_distance_nm)
    }

    /// Time (s) to reach `runway` flying the given speed profile.
    pub fn travel_time_s(&self, runway: &Runway, profile: SpeedProfile) -> f64 {
        let speed = self.aircraft.speed(profile);
        if !speed.is_finite() || speed <= 0.0 {
            return 0.0;
        }
        self.distance_to(runway) * 3600.0 / speed
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WindGroup;

    fn profile() -> Arc<AircraftProfile> {
        Arc::new(AircraftProfile::new("A320", AircraftType::Medium, 120.0).with_speeds(100.0, 120.0, 150.0))
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(1.0, 0.0);
        // One degree of latitude ≈ 60 NM
        assert!((a.distance_nm(&b) - 60.0).abs() < 0.1);
        assert_eq!(a.distance_nm(&a), 0.0);
    }

    #[test]
    fn test_precomputed_distance_wins() {
        let rwy = Runway::new("09L", WindGroup::A)
            .with_location(Location::new(1.0, 0.0))
            .with_approach_distance(5.0);
        let flight = FlightContact::new("TP100", profile())
            .with_position(Location::new(0.0, 0.0))
            .with_runway_distance("09L", 25.0);

        assert!((flight.distance_to(&rwy) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_from_position() {
        let rwy = Runway::new("09L", WindGroup::A).with_location(Location::new(1.0, 0.0));
        let flight = FlightContact::new("TP100", profile()).with_position(Location::new(0.0, 0.0));
        assert!((flight.distance_to(&rwy) - 60.0).abs() < 0.1);
    }

    #[test]
    fn test_travel_time() {
        let rwy = Runway::new("09L", WindGroup::A);
        let flight = FlightContact::new("TP100", profile()).with_runway_distance("09L", 20.0);

        // 20 NM at 120 kt = 10 min
        assert!((flight.travel_time_s(&rwy, SpeedProfile::Optimal) - 600.0).abs() < 1e-9);
        assert!((flight.travel_time_s(&rwy, SpeedProfile::Max) - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_input_degrades_to_zero() {
        let rwy = Runway::new("09L", WindGroup::A);
        let flight = FlightContact::new("TP100", profile()).with_runway_distance("09L", f64::NAN);
        assert_eq!(flight.distance_to(&rwy), 0.0);

        let stalled = Arc::new(AircraftProfile::new("X", AircraftType::Light, 0.0));
        let flight = FlightContact::new("X1", stalled).with_runway_distance("09L", 10.0);
        assert_eq!(flight.travel_time_s(&rwy, SpeedProfile::Optimal), 0.0);
    }
}
