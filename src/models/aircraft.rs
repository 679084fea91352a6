//! Aircraft performance model.
//!
//! An aircraft profile describes one model of aircraft: its wake-turbulence
//! class, its approach speed envelope and its passenger capacity. Profiles are
//! loaded once from configuration and shared by every flight of that model.
//!
//! # Reference
//! ICAO Doc 4444 (PANS-ATM), Ch. 4.9: Wake turbulence categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wake-turbulence class of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AircraftType {
    Light,
    Medium,
    Heavy,
}

impl AircraftType {
    /// All classes, lightest first.
    pub const ALL: [AircraftType; 3] = [AircraftType::Light, AircraftType::Medium, AircraftType::Heavy];

    /// Class name as used in configuration tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftType::Light => "Light",
            AircraftType::Medium => "Medium",
            AircraftType::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AircraftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Light" | "light" => Ok(AircraftType::Light),
            "Medium" | "medium" => Ok(AircraftType::Medium),
            "Heavy" | "heavy" => Ok(AircraftType::Heavy),
            other => Err(format!("unknown aircraft type '{other}'")),
        }
    }
}

/// Approach speed chosen for a flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedProfile {
    Min,
    #[default]
    Optimal,
    Max,
}

impl SpeedProfile {
    pub const ALL: [SpeedProfile; 3] = [SpeedProfile::Min, SpeedProfile::Optimal, SpeedProfile::Max];
}

/// Performance profile of one aircraft model.
///
/// Speeds are in knots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    /// Model designation (e.g. "A320").
    pub model: String,
    /// Wake-turbulence class.
    pub aircraft_type: AircraftType,
    /// Minimum approach speed (kt).
    pub min_speed: f64,
    /// Most economical approach speed (kt).
    pub optimal_speed: f64,
    /// Maximum approach speed (kt).
    pub max_speed: f64,
    /// Seats, used to scale turnaround costs.
    pub passengers: u32,
}

impl AircraftProfile {
    /// Creates a profile with a single speed for all three profiles.
    pub fn new(model: impl Into<String>, aircraft_type: AircraftType, speed: f64) -> Self {
        Self {
            model: model.into(),
            aircraft_type,
            min_speed: speed,
            optimal_speed: speed,
            max_speed: speed,
            passengers: 0,
        }
    }

    /// Sets the approach speed envelope.
    pub fn with_speeds(mut self, min: f64, optimal: f64, max: f64) -> Self {
        self.min_speed = min;
        self.optimal_speed = optimal;
        self.max_speed = max;
        self
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    /// Airspeed (kt) for the given profile.
    #[inline]
    pub fn speed(&self, profile: SpeedProfile) -> f64 {
        match profile {
            SpeedProfile::Min => self.min_speed,
            SpeedProfile::Optimal => self.optimal_speed,
            SpeedProfile::Max => self.max_speed,
        }
    }
}
