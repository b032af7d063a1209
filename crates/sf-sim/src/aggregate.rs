//! Turning a finished run into a [`SimReport`].
//!
//! Everything here is derived from the outcomes and the final counters only,
//! so the report does not depend on how customers interleaved.

use serde::{Deserialize, Serialize};

use sf_agent::{round3, AgentOutcome, TerminalStatus};
use sf_core::{RecommendationConfig, ShelfId};
use sf_spatial::StoreLayout;

use crate::SharedFloor;

// ── Report types ──────────────────────────────────────────────────────────────

/// Run totals: one counter per terminal status plus the global counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_clients:          u64,
    pub completed:              u64,
    pub left_due_to_queue:      u64,
    pub store_closed:           u64,
    pub no_kassa:               u64,
    pub no_path_to_kassa:       u64,
    pub no_path_to_shelf:       u64,
    pub no_start_position:      u64,
    pub kassa_broken:           u64,
    pub total_purchases:        u64,
    pub motive_trigger_count:   u64,
    pub fear_trigger_count:     u64,
    pub discount_trigger_count: u64,
    pub kassa_breakdowns:       u64,
}

impl Statistics {
    pub fn count(&self, status: TerminalStatus) -> u64 {
        match status {
            TerminalStatus::Completed => self.completed,
            TerminalStatus::LeftDueToQueue => self.left_due_to_queue,
            TerminalStatus::StoreClosed => self.store_closed,
            TerminalStatus::NoKassa => self.no_kassa,
            TerminalStatus::NoPathToKassa => self.no_path_to_kassa,
            TerminalStatus::NoPathToShelf => self.no_path_to_shelf,
            TerminalStatus::NoStartPosition => self.no_start_position,
            TerminalStatus::KassaBroken => self.kassa_broken,
        }
    }

    fn count_mut(&mut self, status: TerminalStatus) -> &mut u64 {
        match status {
            TerminalStatus::Completed => &mut self.completed,
            TerminalStatus::LeftDueToQueue => &mut self.left_due_to_queue,
            TerminalStatus::StoreClosed => &mut self.store_closed,
            TerminalStatus::NoKassa => &mut self.no_kassa,
            TerminalStatus::NoPathToKassa => &mut self.no_path_to_kassa,
            TerminalStatus::NoPathToShelf => &mut self.no_path_to_shelf,
            TerminalStatus::NoStartPosition => &mut self.no_start_position,
            TerminalStatus::KassaBroken => &mut self.kassa_broken,
        }
    }

    /// Sum over every terminal status; equals `total_clients`.
    pub fn terminal_total(&self) -> u64 {
        TerminalStatus::ALL.iter().map(|&s| self.count(s)).sum()
    }
}

/// One cell of the visit heatmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularZone {
    pub x:      i32,
    pub z:      i32,
    pub visits: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShelfStatistics {
    pub shelf:           ShelfId,
    pub category:        String,
    pub x:               i32,
    pub z:               i32,
    pub visits:          u64,
    pub purchases:       u64,
    /// `purchases / visits`, rounded to three decimals; zero for an unvisited
    /// shelf.
    pub conversion_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterStatistics {
    /// 1-based register number.
    pub register:          u32,
    pub x:                 i32,
    pub z:                 i32,
    pub served:            u64,
    pub peak_queue_length: usize,
}

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Per-customer outcomes in cohort order, arrival order within a cohort.
    pub results:             Vec<AgentOutcome>,
    pub statistics:          Statistics,
    /// Visited cells, most visited first.
    pub popular_zones:       Vec<PopularZone>,
    pub shelf_statistics:    Vec<ShelfStatistics>,
    pub register_statistics: Vec<RegisterStatistics>,
    pub recommendations:     Vec<String>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Build the report from the outcomes and the final shared counters.
///
/// `placed` lists the shelves that were on the floor; shelves excluded from
/// the grid get no statistics.
pub fn build_report(
    results:    Vec<AgentOutcome>,
    shared:     &SharedFloor,
    layout:     &StoreLayout,
    placed:     &[ShelfId],
    thresholds: &RecommendationConfig,
) -> SimReport {
    let mut statistics = Statistics {
        total_clients:          results.len() as u64,
        total_purchases:        shared.stats.total_purchases,
        motive_trigger_count:   shared.stats.motive_triggers,
        fear_trigger_count:     shared.stats.fear_triggers,
        discount_trigger_count: shared.stats.discount_triggers,
        kassa_breakdowns:       shared.stats.breakdowns,
        ..Statistics::default()
    };
    for outcome in &results {
        *statistics.count_mut(outcome.status) += 1;
    }

    let shelf_statistics = shelf_statistics(shared, layout, placed);
    let recommendations = recommendations(&statistics, &shelf_statistics, thresholds);

    let register_statistics = layout
        .registers
        .iter()
        .zip(&shared.queues)
        .enumerate()
        .map(|(i, (register, queue))| RegisterStatistics {
            register:          i as u32 + 1,
            x:                 register.x,
            z:                 register.z,
            served:            queue.served(),
            peak_queue_length: queue.peak_length(),
        })
        .collect();

    SimReport {
        results,
        statistics,
        popular_zones: popular_zones(shared),
        shelf_statistics,
        register_statistics,
        recommendations,
    }
}

/// Visit counts, descending; ties by `x` then `z`.
pub fn popular_zones(shared: &SharedFloor) -> Vec<PopularZone> {
    let mut zones: Vec<PopularZone> = shared
        .grid
        .visit_counts()
        .iter()
        .map(|(cell, &visits)| PopularZone { x: cell.x, z: cell.z, visits })
        .collect();
    zones.sort_unstable_by(|a, b| b.visits.cmp(&a.visits).then(a.x.cmp(&b.x)).then(a.z.cmp(&b.z)));
    zones
}

pub fn shelf_statistics(shared: &SharedFloor, layout: &StoreLayout, placed: &[ShelfId]) -> Vec<ShelfStatistics> {
    placed
        .iter()
        .map(|&id| {
            let shelf = layout.shelf(id);
            let visits = shared.shelf_arrivals[id.index()];
            let purchases = shared.shelf_purchases[id.index()];
            ShelfStatistics {
                shelf: id,
                category: shelf.category.clone(),
                x: shelf.x,
                z: shelf.z,
                visits,
                purchases,
                conversion_rate: conversion(purchases, visits),
            }
        })
        .collect()
}

fn conversion(purchases: u64, visits: u64) -> f64 {
    if visits == 0 { 0.0 } else { round3(purchases as f64 / visits as f64) }
}

// ── Recommendations ───────────────────────────────────────────────────────────

/// Plain-language layout hints.
///
/// Shelves are compared against the store-wide average visits per shelf and
/// the store-wide conversion rate (all purchases over all visits).
pub fn recommendations(
    statistics: &Statistics,
    shelves:    &[ShelfStatistics],
    thresholds: &RecommendationConfig,
) -> Vec<String> {
    let mut out = Vec::new();

    if statistics.left_due_to_queue > 0 {
        out.push(format!(
            "{} customer(s) left because the checkout queue was full; \
             consider opening more registers or allowing longer queues",
            statistics.left_due_to_queue
        ));
    }
    if statistics.kassa_breakdowns > 0 {
        out.push(format!(
            "{} register breakdown(s) occurred; schedule register maintenance",
            statistics.kassa_breakdowns
        ));
    }

    let total_visits: u64 = shelves.iter().map(|s| s.visits).sum();
    if shelves.is_empty() || total_visits == 0 {
        return out;
    }
    let total_purchases: u64 = shelves.iter().map(|s| s.purchases).sum();
    let avg_visits = total_visits as f64 / shelves.len() as f64;
    let avg_conversion = total_purchases as f64 / total_visits as f64;

    for shelf in shelves {
        let visits = shelf.visits as f64;
        let rate = if shelf.visits == 0 { 0.0 } else { shelf.purchases as f64 / visits };
        let name = format!("shelf '{}' at ({}, {})", shelf.category, shelf.x, shelf.z);

        if visits < thresholds.low_visit_ratio * avg_visits {
            out.push(format!(
                "{name} is rarely visited ({} visits, average {avg_visits:.1}); \
                 move it closer to the entrance or a main aisle",
                shelf.visits
            ));
        } else if rate < thresholds.low_conversion_ratio * avg_conversion {
            out.push(format!(
                "{name} converts poorly ({:.3} vs store average {:.3}); \
                 review its prices, discounts or product mix",
                round3(rate),
                round3(avg_conversion)
            ));
        } else if visits > thresholds.high_visit_ratio * avg_visits && rate >= avg_conversion {
            out.push(format!(
                "{name} is a high performer ({} visits, conversion {:.3}); \
                 a good spot for promoted products",
                shelf.visits,
                round3(rate)
            ));
        }
    }
    out
}
