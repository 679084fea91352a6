//! Configuration validation for landing scheduling.
//!
//! Checks structural integrity of the airport and aircraft tables before
//! scheduling. Detects:
//! - Duplicate runway IDs and aircraft models
//! - Runways that accept no aircraft class
//! - Separation minima referring to unknown runways
//! - Negative separations and approach legs
//! - Non-positive or misordered speed profiles
//!
//! Scheduling itself never fails on these: bad values degrade to zero or to
//! the infeasibility cost. Validation reports them up front instead.

use std::collections::HashSet;

use crate::models::{AircraftProfile, Airport, DAY_S};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// The airport has no runways.
    NoRunways,
    /// A runway accepts no aircraft class.
    NoPermittedTypes,
    /// A separation entry names a runway that doesn't exist.
    UnknownRunwayReference,
    /// A separation minimum or approach distance is negative or not finite.
    InvalidDistance,
    /// A wind switch lies outside the day or is out of order.
    InvalidWindSchedule,
    /// A speed is non-positive or the profile is misordered.
    InvalidSpeed,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// Validates an airport configuration.
///
/// Checks:
/// 1. At least one runway
/// 2. No duplicate runway IDs
/// 3. Every runway accepts at least one aircraft class
/// 4. Approach distances are non-negative
/// 5. Separation entries reference existing runways
/// 6. Separation minima (and defaults) are non-negative
/// 7. Wind switches lie within the day, in ascending order
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_airport(airport: &Airport) -> ValidationResult {
    let mut errors = Vec::new();

    if airport.runways.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRunways,
            format!("Airport '{}' has no runways", airport.code),
        ));
    }

    let mut runway_ids = HashSet::new();
    for r in &airport.runways {
        if !runway_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate runway ID: {}", r.id),
            ));
        }
        if r.permissions.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoPermittedTypes,
                format!("Runway '{}' accepts no aircraft type", r.id),
            ));
        }
        if !is_non_negative(r.approach_distance_nm) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDistance,
                format!(
                    "Runway '{}' has invalid approach distance {}",
                    r.id, r.approach_distance_nm
                ),
            ));
        }
        if !is_non_negative(r.separation.default_s) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDistance,
                format!(
                    "Runway '{}' has invalid default separation {}",
                    r.id, r.separation.default_s
                ),
            ));
        }
    }

    // Separation references need the complete ID set
    for r in &airport.runways {
        for (leading, lead, trail, seconds) in r.separation.entries() {
            if !runway_ids.contains(leading) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRunwayReference,
                    format!("Runway '{}' has separation behind unknown runway '{leading}'", r.id),
                ));
            }
            if !is_non_negative(seconds) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDistance,
                    format!(
                        "Runway '{}' has invalid separation {seconds} behind {lead} on '{leading}' for {trail}",
                        r.id
                    ),
                ));
            }
        }
    }

    let mut previous = f64::NEG_INFINITY;
    for switch in airport.wind.switches() {
        if !(0.0..DAY_S).contains(&switch.at_s) || switch.at_s < previous {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWindSchedule,
                format!("Wind switch at {}s is outside the day or out of order", switch.at_s),
            ));
        }
        previous = switch.at_s;
    }

    finish(errors)
}

/// Validates the aircraft performance table.
///
/// Checks:
/// 1. No duplicate model names
/// 2. All speeds are positive
/// 3. min ≤ optimal ≤ max
pub fn validate_aircraft(profiles: &[AircraftProfile]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut models = HashSet::new();

    for p in profiles {
        if !models.insert(p.model.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate aircraft model: {}", p.model),
            ));
        }

        let speeds = [p.min_speed, p.optimal_speed, p.max_speed];
        if speeds.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSpeed,
                format!("Aircraft '{}' has a non-positive speed {speeds:?}", p.model),
            ));
        } else if !(p.min_speed <= p.optimal_speed && p.optimal_speed <= p.max_speed) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSpeed,
                format!("Aircraft '{}' speeds are not ordered min <= optimal <= max", p.model),
            ));
        }
    }

    finish(errors)
}
