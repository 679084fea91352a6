//! Runway model and separation minima.
//!
//! A runway accepts a subset of aircraft classes, belongs to one wind group,
//! and carries the separation minima that apply when an aircraft lands on it
//! after another landing (on itself or on a dependent runway).
//!
//! # Reference
//! ICAO Doc 4444 (PANS-ATM), Ch. 8.7.3: Wake turbulence separation minima

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::{AircraftType, Location};

/// (leading class, trailing class) → seconds, for one leading runway.
type ClassMinima = HashMap<(AircraftType, AircraftType), f64>;

/// Time-of-day usability group of a runway.
///
/// Runways of the two groups face opposite directions; only one group is
/// usable at a time depending on the prevailing wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindGroup {
    A,
    B,
}

/// Separation minima for landings on one (trailing) runway.
///
/// Maps (leading runway, leading class, trailing class) → seconds.
/// Asymmetric: Heavy→Light is usually larger than Light→Heavy.
///
/// Keyed by leading runway first so lookups borrow the runway ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeparationMatrix {
    #[serde(with = "minima_list")]
    minima: HashMap<String, ClassMinima>,
    /// Separation used when no explicit minimum is defined (s).
    pub default_s: f64,
}

impl SeparationMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback separation.
    pub fn with_default(mut self, default_s: f64) -> Self {
        self.default_s = default_s;
        self
    }

    /// Defines the minimum time between a `leading` landing on
    /// `leading_runway` and a `trailing` landing on this runway.
    pub fn set(
        &mut self,
        leading_runway: impl Into<String>,
        leading: AircraftType,
        trailing: AircraftType,
        seconds: f64,
    ) {
        self.minima
            .entry(leading_runway.into())
            .or_default()
            .insert((leading, trailing), seconds);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(
        mut self,
        leading_runway: impl Into<String>,
        leading: AircraftType,
        trailing: AircraftType,
        seconds: f64,
    ) -> Self {
        self.set(leading_runway, leading, trailing, seconds);
        self
    }

    /// Sets the same minimum for every class pair behind `leading_runway`.
    pub fn with_uniform(mut self, leading_runway: impl Into<String>, seconds: f64) -> Self {
        let runway = leading_runway.into();
        for leading in AircraftType::ALL {
            for trailing in AircraftType::ALL {
                self.set(runway.clone(), leading, trailing, seconds);
            }
        }
        self
    }

    /// Required separation (s); the default when undefined.
    pub fn get(&self, leading_runway: &str, leading: AircraftType, trailing: AircraftType) -> f64 {
        self.minima
            .get(leading_runway)
            .and_then(|classes| classes.get(&(leading, trailing)))
            .copied()
            .unwrap_or(self.default_s)
    }

    /// Iterates over explicitly defined entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, AircraftType, AircraftType, f64)> {
        self.minima.iter().flat_map(|(rwy, classes)| {
            classes
                .iter()
                .map(move |(&(lead, trail), &s)| (rwy.as_str(), lead, trail, s))
        })
    }

    /// Number of explicitly defined minima.
    pub fn len(&self) -> usize {
        self.minima.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.minima.values().all(HashMap::is_empty)
    }
}

/// Serializes the minima as a list of entries (JSON maps need string keys).
mod minima_list {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ClassMinima;
    use crate::models::AircraftType;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        leading_runway: String,
        leading: AircraftType,
        trailing: AircraftType,
        seconds: f64,
    }

    pub fn serialize<S: Serializer>(
        minima: &HashMap<String, ClassMinima>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<Entry> = minima
            .iter()
            .flat_map(|(rwy, classes)| {
                classes.iter().map(move |(&(leading, trailing), &seconds)| Entry {
                    leading_runway: rwy.clone(),
                    leading,
                    trailing,
                    seconds,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            (&a.leading_runway, a.leading, a.trailing).cmp(&(&b.leading_runway, b.leading, b.trailing))
        });
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<String, ClassMinima>, D::Error> {
        let mut minima: HashMap<String, ClassMinima> = HashMap::new();
        for e in Vec::<Entry>::deserialize(deserializer)? {
            minima
                .entry(e.leading_runway)
                .or_default()
                .insert((e.leading, e.trailing), e.seconds);
        }
        Ok(minima)
    }
}

/// A landing runway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    /// Runway designator (e.g. "03L").
    pub id: String,
    /// Aircraft classes allowed to land.
    pub permissions: BTreeSet<AircraftType>,
    /// Wind group this runway belongs to.
    pub wind_group: WindGroup,
    /// Length of the final approach leg (NM).
    pub approach_distance_nm: f64,
    /// Threshold position.
    pub location: Option<Location>,
    /// Separation minima for landings on this runway.
    pub separation: SeparationMatrix,
}

impl Runway {
    /// Creates a runway accepting every aircraft class.
    pub fn new(id: impl Into<String>, wind_group: WindGroup) -> Self {
        Self {
            id: id.into(),
            permissions: AircraftType::ALL.into_iter().collect(),
            wind_group,
            approach_distance_nm: 0.0,
            location: None,
            separation: SeparationMatrix::new(),
        }
    }

    /// Restricts the accepted aircraft classes.
    pub fn with_permissions(mut self, types: impl IntoIterator<Item = AircraftType>) -> Self {
        self.permissions = types.into_iter().collect();
        self
    }

    /// Sets the approach-leg length (NM).
    pub fn with_approach_distance(mut self, nm: f64) -> Self {
        self.approach_distance_nm = nm;
        self
    }

    /// Sets the threshold position.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the separation matrix.
    pub fn with_separation(mut self, separation: SeparationMatrix) -> Self {
        self.separation = separation;
        self
    }

    /// Whether an aircraft of this class may land here.
    #[inline]
    pub fn permits(&self, aircraft_type: AircraftType) -> bool {
        self.permissions.contains(&aircraft_type)
    }

    /// Required separation (s) behind a `leading` landing on `leading_runway`.
    #[inline]
    pub fn required_separation(
        &self,
        leading_runway: &str,
        leading: AircraftType,
        trailing: AircraftType,
    ) -> f64 {
        self.separation.get(leading_runway, leading, trailing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separation_matrix_lookup() {
        let sep = SeparationMatrix::new()
            .with_default(60.0)
            .with("09L", AircraftType::Heavy, AircraftType::Light, 180.0)
            .with("09L", AircraftType::Light, AircraftType::Heavy, 90.0);

        assert_eq!(sep.get("09L", AircraftType::Heavy, AircraftType::Light), 180.0);
        assert_eq!(sep.get("09L", AircraftType::Light, AircraftType::Heavy), 90.0);
        assert_eq!(sep.get("09R", AircraftType::Heavy, AircraftType::Light), 60.0);
        assert_eq!(sep.len(), 2);
    }

    #[test]
    fn test_separation_grouped_by_leading_runway() {
        let mut sep = SeparationMatrix::new()
            .with_default(75.0)
            .with_uniform("27", 120.0)
            .with("09", AircraftType::Heavy, AircraftType::Light, 200.0);
        sep.set("27", AircraftType::Heavy, AircraftType::Light, 180.0);

        // overwrite keeps the count
        assert_eq!(sep.len(), 10);
        assert!(!sep.is_empty());
        assert_eq!(sep.get("27", AircraftType::Heavy, AircraftType::Light), 180.0);
        assert_eq!(sep.get("09", AircraftType::Heavy, AircraftType::Light), 200.0);
        assert_eq!(sep.get("09", AircraftType::Light, AircraftType::Heavy), 75.0);
        assert_eq!(sep.get("", AircraftType::Medium, AircraftType::Medium), 75.0);

        let behind_09: Vec<_> = sep.entries().filter(|(rwy, ..)| *rwy == "09").collect();
        assert_eq!(behind_09, vec![("09", AircraftType::Heavy, AircraftType::Light, 200.0)]);
        assert_eq!(sep.entries().count(), sep.len());

        let json = serde_json::to_string(&sep).unwrap();
        let back: SeparationMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sep);
        assert!(SeparationMatrix::new().is_empty());
    }

    #[test]
    fn test_uniform_separation() {
        let sep = SeparationMatrix::new().with_uniform("27", 120.0);
        assert_eq!(sep.len(), 9);
        for lead in AircraftType::ALL {
            for trail in AircraftType::ALL {
                assert_eq!(sep.get("27", lead, trail), 120.0);
            }
        }
    }

    #[test]
    fn test_separation_json_round_trip() {
        let rwy = Runway::new("27L", WindGroup::A).with_separation(
            SeparationMatrix::new()
                .with_default(60.0)
                .with("27R", AircraftType::Heavy, AircraftType::Light, 180.0),
        );
        let json = serde_json::to_string(&rwy).unwrap();
        assert!(json.contains("\"leading_runway\":\"27R\""));

        let back: Runway = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rwy);
    }

    #[test]
    fn test_runway_permissions() {
        let rwy = Runway::new("03R", WindGroup::B)
            .with_permissions([AircraftType::Light, AircraftType::Medium]);

        assert!(rwy.permits(AircraftType::Light));
        assert!(!rwy.permits(AircraftType::Heavy));
        assert!(Runway::new("21L", WindGroup::A).permits(AircraftType::Heavy));
    }
}
