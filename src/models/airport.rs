//! Airport model: the runway set and the wind schedule.
//!
//! # Time Model
//! Scheduling times are seconds after the snapshot epoch. The wind schedule
//! maps them onto the wall-clock time of day through `epoch_time_of_day_s`.

use serde::{Deserialize, Serialize};

use super::{Runway, WindGroup};

/// Seconds in a day.
pub const DAY_S: f64 = 86_400.0;

/// A point in the day at which the active wind group changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSwitch {
    /// Time of day (s after midnight).
    pub at_s: f64,
    /// Group active from this point on.
    pub group: WindGroup,
}

/// Time-of-day table of the usable wind group.
///
/// With no switch points every group is usable at all times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindSchedule {
    /// Wall-clock time of day at the snapshot epoch (s after midnight).
    pub epoch_time_of_day_s: f64,
    /// Switch points, sorted by `at_s`.
    switches: Vec<WindSwitch>,
}

impl WindSchedule {
    /// Creates an empty (always usable) schedule.
    pub fn new(epoch_time_of_day_s: f64) -> Self {
        Self {
            epoch_time_of_day_s,
            switches: Vec::new(),
        }
    }

    /// Adds a switch point.
    pub fn with_switch(mut self, at_s: f64, group: WindGroup) -> Self {
        self.switches.push(WindSwitch {
            at_s: at_s.rem_euclid(DAY_S),
            group,
        });
        self.switches.sort_by(|a, b| a.at_s.total_cmp(&b.at_s));
        self
    }

    pub fn switches(&self) -> &[WindSwitch] {
        &self.switches
    }

    /// Time of day (s after midnight) at scheduling time `t_s`.
    pub fn time_of_day(&self, t_s: f64) -> f64 {
        let t = self.epoch_time_of_day_s + t_s;
        if t.is_finite() { t.rem_euclid(DAY_S) } else { 0.0 }
    }

    /// Group in force at scheduling time `t_s`, `None` when unrestricted.
    pub fn active_group(&self, t_s: f64) -> Option<WindGroup> {
        let last = self.switches.last()?;
        let tod = self.time_of_day(t_s);
        let group = self
            .switches
            .iter()
            .rev()
            .find(|s| s.at_s <= tod)
            .map(|s| s.group)
            // before the first switch of the day the last one still holds
            .unwrap_or(last.group);
        Some(group)
    }

    /// Whether runways of `group` are usable at scheduling time `t_s`.
    pub fn is_active(&self, group: WindGroup, t_s: f64) -> bool {
        self.active_group(t_s).is_none_or(|g| g == group)
    }
}

/// An airport: ordered runways and the wind schedule.
///
/// The index of a runway in `runways` is its handle inside schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// ICAO code.
    pub code: String,
    pub runways: Vec<Runway>,
    pub wind: WindSchedule,
}

impl Airport {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            runways: Vec::new(),
            wind: WindSchedule::default(),
        }
    }

    /// Adds a runway.
    pub fn with_runway(mut self, runway: Runway) -> Self {
        self.runways.push(runway);
        self
    }

    /// Sets the wind schedule.
    pub fn with_wind(mut self, wind: WindSchedule) -> Self {
        self.wind = wind;
        self
    }

    #[inline]
    pub fn runway_count(&self) -> usize {
        self.runways.len()
    }

    #[inline]
    pub fn runway(&self, index: usize) -> Option<&Runway> {
        self.runways.get(index)
    }

    /// Index of the runway with the given designator.
    pub fn runway_index(&self, id: &str) -> Option<usize> {
        self.runways.iter().position(|r| r.id == id)
    }

    /// Indices of the runways in a wind group, in declaration order.
    pub fn runways_in_group(&self, group: WindGroup) -> Vec<usize> {
        self.runways
            .iter()
            .enumerate()
            .filter(|(_, r)| r.wind_group == group)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of the runways usable at scheduling time `t_s`.
    pub fn active_runways(&self, t_s: f64) -> Vec<usize> {
        match self.wind.active_group(t_s) {
            Some(group) => self.runways_in_group(group),
            None => (0..self.runways.len()).collect(),
        }
    }
}
