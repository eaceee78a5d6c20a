use crate::address::Address;
use crate::errors::{Result, StoreError};

use super::event::Event;

/// Append-only event history of one model
///
/// Entries are ordered by strictly increasing revision; each revision has
/// exactly one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    entries: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the event committed at the next revision
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the revision does not exceed the last one.
    pub fn append(&mut self, event: Event) -> Result<()> {
        if let Some(last) = self.last_revision() {
            if event.revision() <= last {
                return Err(StoreError::InvariantViolation {
                    model: event
                        .target()
                        .model_address()
                        .map(|a| a.to_string())
                        .unwrap_or_default(),
                    reason: format!(
                        "event revision {} does not follow logged revision {}",
                        event.revision(),
                        last
                    ),
                });
            }
        }
        self.entries.push(event);
        Ok(())
    }

    pub fn last_revision(&self) -> Option<u64> {
        self.entries.last().map(Event::revision)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn event_at(&self, revision: u64) -> Option<&Event> {
        let index = self
            .entries
            .binary_search_by_key(&revision, Event::revision)
            .ok()?;
        self.entries.get(index)
    }

    /// Events visible at `address` with revision in `[begin, end]`
    ///
    /// A transaction event is returned whole when `address` is its target or
    /// above it. Below the target only the matching constituents are
    /// returned, unwrapped.
    pub fn events(&self, address: &Address, begin: u64, end: u64) -> Vec<Event> {
        if begin > end {
            return Vec::new();
        }
        let start = self.entries.partition_point(|e| e.revision() < begin);
        let stop = self.entries.partition_point(|e| e.revision() <= end);

        let mut visible = Vec::new();
        for event in &self.entries[start..stop] {
            match event {
                Event::Atomic(atomic) => {
                    if address.contains(&atomic.changed_entity) {
                        visible.push(event.clone());
                    }
                }
                Event::Transaction(txn) => {
                    if address.contains(&txn.target) {
                        visible.push(event.clone());
                    } else {
                        visible.extend(
                            txn.events
                                .iter()
                                .filter(|e| address.contains(&e.changed_entity))
                                .cloned()
                                .map(Event::Atomic),
                        );
                    }
                }
            }
        }
        visible
    }
}
