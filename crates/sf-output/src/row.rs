//! Flat row types written by output backends.
//!
//! Each row borrows nothing: it is built from an outcome or a report section
//! and handed to a backend as plain columns.

use sf_agent::AgentOutcome;
use sf_sim::{PopularZone, ShelfStatistics};

/// One line of a customer's path log.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRow {
    pub agent_id: u32,
    /// Position of the entry within the customer's log, from 0.
    pub seq:      u32,
    pub x:        i32,
    pub z:        i32,
    /// Milliseconds since midnight.
    pub time_ms:  u64,
    /// `true` for a walked cell, `false` for an event-only marker.
    pub step:     bool,
    /// Rendered event, empty when the entry carries none.
    pub event:    String,
}

impl PathRow {
    pub fn from_outcome(outcome: &AgentOutcome) -> impl Iterator<Item = PathRow> + '_ {
        outcome.path.iter().enumerate().map(move |(seq, entry)| PathRow {
            agent_id: outcome.agent.0,
            seq:      seq as u32,
            x:        entry.x,
            z:        entry.z,
            time_ms:  entry.time.0,
            step:     entry.is_step(),
            event:    entry.event.as_ref().map(ToString::to_string).unwrap_or_default(),
        })
    }
}

/// The summary of one finished visit.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRow {
    pub agent_id:    u32,
    pub client:      String,
    pub arrival_ms:  u64,
    pub end_time_ms: u64,
    pub status:      &'static str,
    pub steps:       u64,
    pub purchases:   u64,
}

impl From<&AgentOutcome> for OutcomeRow {
    fn from(outcome: &AgentOutcome) -> Self {
        Self {
            agent_id:    outcome.agent.0,
            client:      outcome.client.clone(),
            arrival_ms:  outcome.arrival.0,
            end_time_ms: outcome.end_time.0,
            status:      outcome.status.as_str(),
            steps:       outcome.steps().count() as u64,
            purchases:   outcome.purchase_count() as u64,
        }
    }
}

/// One heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRow {
    pub x:      i32,
    pub z:      i32,
    pub visits: u64,
}

impl From<&PopularZone> for ZoneRow {
    fn from(zone: &PopularZone) -> Self {
        Self { x: zone.x, z: zone.z, visits: zone.visits }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShelfRow {
    pub shelf_id:        u32,
    pub category:        String,
    pub x:               i32,
    pub z:               i32,
    pub visits:          u64,
    pub purchases:       u64,
    pub conversion_rate: f64,
}

impl From<&ShelfStatistics> for ShelfRow {
    fn from(stats: &ShelfStatistics) -> Self {
        Self {
            shelf_id:        stats.shelf.0,
            category:        stats.category.clone(),
            x:               stats.x,
            z:               stats.z,
            visits:          stats.visits,
            purchases:       stats.purchases,
            conversion_rate: stats.conversion_rate,
        }
    }
}
