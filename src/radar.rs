//! Approach radar table.
//!
//! The flight feed admits contacts concurrently while the scheduler reads
//! them. A scheduling run never works on the live table: it takes a
//! [`FlightSnapshot`], which freezes the contact set and its admission order.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::{trace, warn};

use crate::models::FlightContact;

const READY_POLL: Duration = Duration::from_millis(5);

/// Concurrent table of inbound flights keyed by flight ID.
#[derive(Debug, Default)]
pub struct FlightRadar {
    contacts: DashMap<String, (u64, Arc<FlightContact>)>,
    next_seq: AtomicU64,
    ready: AtomicBool,
}

impl FlightRadar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a contact. Returns `false` if the flight is already tracked.
    pub fn admit(&self, contact: FlightContact) -> bool {
        match self.contacts.entry(contact.flight_id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                trace!("radar: admitted {} (#{seq})", contact.flight_id);
                slot.insert((seq, Arc::new(contact)));
                true
            }
        }
    }

    pub fn get(&self, flight_id: &str) -> Option<Arc<FlightContact>> {
        self.contacts.get(flight_id).map(|e| Arc::clone(&e.1))
    }

    pub fn remove(&self, flight_id: &str) -> Option<Arc<FlightContact>> {
        self.contacts.remove(flight_id).map(|(_, (_, c))| c)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Drops every contact and clears readiness, ready for the next wave.
    pub fn clear(&self) {
        self.ready.store(false, Ordering::Release);
        self.contacts.clear();
    }

    /// Signals that the table holds a usable snapshot.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Blocks until the table is ready or `timeout` elapses.
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        while !self.is_ready() {
            if start.elapsed() >= timeout {
                return false;
            }
            thread::sleep(READY_POLL);
        }
        true
    }

    /// Freezes the current contact set, in admission order.
    pub fn snapshot(&self) -> FlightSnapshot {
        let mut entries: Vec<(u64, Arc<FlightContact>)> = self
            .contacts
            .iter()
            .map(|e| (e.value().0, Arc::clone(&e.value().1)))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        FlightSnapshot {
            contacts: entries.into_iter().map(|(_, c)| c).collect(),
        }
    }
}

/// A frozen, ordered set of flight contacts.
#[derive(Debug, Clone, Default)]
pub struct FlightSnapshot {
    contacts: Vec<Arc<FlightContact>>,
}

impl FlightSnapshot {
    /// Builds a snapshot from contacts in admission order.
    ///
    /// Flight IDs are unique within a snapshot: a repeated ID keeps its
    /// first contact and later ones are dropped, as the radar does on
    /// admission.
    pub fn new(contacts: impl IntoIterator<Item = FlightContact>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for contact in contacts {
            if seen.insert(contact.flight_id.clone()) {
                kept.push(Arc::new(contact));
            } else {
                warn!("snapshot: dropped duplicate contact {}", contact.flight_id);
            }
        }
        Self { contacts: kept }
    }

    pub fn contacts(&self) -> &[Arc<FlightContact>] {
        &self.contacts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<FlightContact>> {
        self.contacts.iter()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contains(&self, flight_id: &str) -> bool {
        self.contacts.iter().any(|c| c.flight_id == flight_id)
    }
}
