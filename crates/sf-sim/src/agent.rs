//! One customer's visit, from the entrance to the register.
//!
//! ```text
//! Entering ─► Shopping(item 0..n) ─► CheckoutSelection ─► CheckoutQueueing ─► Completed
//!    │             │    └─► spontaneous check after each purchase
//!    ▼             ▼                    │                      │
//! no_start_position  store_closed       kassa_broken           no_path_to_kassa
//!                  no_path_to_shelf     left_due_to_queue      store_closed
//! ```
//!
//! A visit never fails: every exit is a [`TerminalStatus`].  The customer's
//! floor cell is released whichever way the visit ends.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use sf_agent::{
    round3, AgentOutcome, AgentProfile, AgentRun, PathEntry, PathEvent, PurchaseRecord, TerminalStatus,
};
use sf_behavior::{PurchaseContext, PurchaseModel};
use sf_core::{AgentId, AgentRng, Cell, ShelfId, SimConfig, SimTime};
use sf_mobility::{FloorAccess, MoveStatus, MovementExecutor};
use sf_spatial::{Catalog, CatalogEntry, Pathfinder, ShelfIndex, StoreLayout};

use crate::{checkout, Floor};

/// How a walk to a target ended, from the customer's point of view.
enum Walk {
    Arrived,
    Closed,
    Blocked,
}

/// Everything a customer's visit reads, plus the shared floor it mutates.
///
/// Built once per run and shared by reference with every worker thread.
pub struct StoreContext<'a, M: PurchaseModel, P: Pathfinder> {
    pub config:   &'a SimConfig,
    pub layout:   &'a StoreLayout,
    pub catalog:  &'a Catalog,
    pub shelves:  &'a ShelfIndex,
    pub model:    &'a M,
    pub executor: &'a MovementExecutor<P>,
    pub floor:    &'a Floor,
}

impl<M: PurchaseModel, P: Pathfinder> StoreContext<'_, M, P> {
    /// Simulate one visit that starts at `start`.
    pub fn simulate(&self, agent: AgentId, profile: &AgentProfile, start: SimTime) -> AgentOutcome {
        let mut rng = AgentRng::new(self.config.seed, agent);
        let mut run = AgentRun::new(agent, profile.name.clone(), start);

        let status = if self.config.hours.is_closed_at(start) {
            TerminalStatus::StoreClosed
        } else if !self.enter(&mut run) {
            TerminalStatus::NoStartPosition
        } else {
            let status = self.shop_and_pay(profile, &mut run, &mut rng);
            let position = run.position;
            self.floor.with_floor(|grid| grid.release(position));
            status
        };

        debug!(agent = %agent, status = %status, end = %run.time, "visit finished");
        run.finish(status)
    }

    // ── Entering ──────────────────────────────────────────────────────────

    /// Claim the entrance, or the first free cell of its row.
    fn enter(&self, run: &mut AgentRun) -> bool {
        let entrance = self.config.grid.entrance;
        let width = self.config.grid.width as i32;
        let claimed = self.floor.with_floor(|grid| {
            let cell = if grid.is_occupied(entrance) {
                (0..width).map(|x| Cell::new(x, entrance.z)).find(|&c| !grid.is_occupied(c))?
            } else {
                entrance
            };
            grid.occupy(cell);
            grid.record_visit(cell);
            Some(cell)
        });

        let Some(cell) = claimed else {
            return false;
        };
        run.extend_steps([PathEntry::step(cell, run.time)]);
        run.annotate(PathEvent::EnteredStore);
        true
    }

    // ── Shopping ──────────────────────────────────────────────────────────

    fn shop_and_pay(&self, profile: &AgentProfile, run: &mut AgentRun, rng: &mut AgentRng) -> TerminalStatus {
        for item in &profile.shopping_list {
            if self.config.hours.is_closed_at(run.time) {
                return TerminalStatus::StoreClosed;
            }
            let Some(entry) = self.catalog.resolve(item) else {
                trace!(agent = %run.agent, item = %item, "item not stocked, skipped");
                continue;
            };
            if let ControlFlow::Break(status) = self.visit_shelf(profile, item, entry, run, rng) {
                return status;
            }
        }
        self.checkout(run, rng)
    }

    fn visit_shelf(
        &self,
        profile: &AgentProfile,
        item:    &str,
        entry:   CatalogEntry,
        run:     &mut AgentRun,
        rng:     &mut AgentRng,
    ) -> ControlFlow<TerminalStatus> {
        let idx = entry.shelf.index();
        let shelf = self.layout.shelf(entry.shelf);
        let product = &shelf.products[entry.product];

        let arrivals = self.floor.with(|shared| shared.cohort_arrivals[idx]);
        let ctx = PurchaseContext {
            profile,
            category:      &shelf.category,
            product,
            shelf_quality: self.model.shelf_quality(arrivals),
            now:           run.time,
        };
        let assessment = self.model.assess(&ctx);
        self.floor.with(|shared| shared.stats.count_triggers(assessment.triggers));

        if assessment.chance < self.model.approach_threshold() {
            return ControlFlow::Continue(());
        }

        match self.walk_to(run, shelf.origin()) {
            Walk::Arrived => {}
            Walk::Closed => return ControlFlow::Break(TerminalStatus::StoreClosed),
            Walk::Blocked => return ControlFlow::Break(TerminalStatus::NoPathToShelf),
        }

        self.floor.with(|shared| shared.shelf_arrivals[idx] += 1);
        let purchased = rng.draw_below(assessment.chance);
        let chance = round3(assessment.chance);
        run.annotate(PathEvent::ArrivedShelf {
            category: shelf.category.clone(),
            item:     item.to_owned(),
            chance,
            purchased,
        });
        run.record_purchase(PurchaseRecord {
            item:        item.to_owned(),
            category:    shelf.category.clone(),
            x:           run.position.x,
            z:           run.position.z,
            time:        run.time,
            chance,
            purchased,
            spontaneous: false,
        });

        if purchased {
            self.floor.with(|shared| {
                shared.stats.total_purchases += 1;
                shared.shelf_purchases[idx] += 1;
            });
            self.spontaneous(entry.shelf, run, rng);
        }
        ControlFlow::Continue(())
    }

    /// Impulse buys from attractive shelves next to where the customer
    /// stands.  Only successful picks are logged.
    fn spontaneous(&self, current: ShelfId, run: &mut AgentRun, rng: &mut AgentRng) {
        let cfg = &self.config.spontaneous;
        for id in self.shelves.adjacent(run.position) {
            if id == current {
                continue;
            }
            let shelf = self.layout.shelf(id);
            if shelf.attraction <= cfg.attraction_threshold {
                continue;
            }
            let chance = shelf.attraction * cfg.factor;
            if !rng.draw_below(chance) {
                continue;
            }
            let Some(product) = rng.choose(&shelf.products) else {
                continue;
            };

            self.floor.with(|shared| {
                shared.stats.total_purchases += 1;
                shared.shelf_arrivals[id.index()] += 1;
                shared.shelf_purchases[id.index()] += 1;
            });
            run.record_purchase(PurchaseRecord {
                item:        product.name.clone(),
                category:    shelf.category.clone(),
                x:           run.position.x,
                z:           run.position.z,
                time:        run.time,
                chance:      round3(chance),
                purchased:   true,
                spontaneous: true,
            });
            run.mark(PathEvent::SpontaneousPurchase {
                category: shelf.category.clone(),
                item:     product.name.clone(),
            });
        }
    }

    // ── Checkout ──────────────────────────────────────────────────────────

    fn checkout(&self, run: &mut AgentRun, rng: &mut AgentRng) -> TerminalStatus {
        let cfg = &self.config.checkout;
        let registers = &self.layout.registers;
        let position = run.position;

        let chosen = self.floor.with(|shared| {
            checkout::choose_register(registers, &shared.queues, position)
                .map(|id| (id, shared.queues[id.index()].is_full(cfg.max_queue_length)))
        });
        let Some((register, full)) = chosen else {
            return TerminalStatus::NoKassa;
        };

        if rng.draw_below(cfg.breakdown_probability) {
            self.floor.with(|shared| shared.stats.breakdowns += 1);
            run.mark(PathEvent::RegisterBroken { register: register.number() });
            return TerminalStatus::KassaBroken;
        }
        if full {
            return TerminalStatus::LeftDueToQueue;
        }

        match self.walk_to(run, self.layout.register(register).cell()) {
            Walk::Arrived => {}
            Walk::Closed => return TerminalStatus::StoreClosed,
            Walk::Blocked => return TerminalStatus::NoPathToKassa,
        }

        let agent = run.agent;
        let joined = self
            .floor
            .with(|shared| shared.queues[register.index()].join(agent, cfg.max_queue_length));
        let Some(position) = joined else {
            return TerminalStatus::LeftDueToQueue;
        };

        let waited_ms = checkout::queue_wait_ms(position, cfg.service_time_ms);
        run.time = run.time + waited_ms;
        run.mark(PathEvent::FinishedQueue { register: register.number(), waited_ms });
        self.floor.with(|shared| shared.queues[register.index()].leave(agent));

        if self.config.hours.is_closed_at(run.time) {
            TerminalStatus::StoreClosed
        } else {
            TerminalStatus::Completed
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────

    fn walk_to(&self, run: &mut AgentRun, goal: Cell) -> Walk {
        let path = match self.executor.plan(self.floor, run.position, goal) {
            Ok(path) => path,
            Err(err) => {
                debug!(agent = %run.agent, from = %run.position, goal = %goal, %err, "no path");
                return Walk::Blocked;
            }
        };
        let outcome = match self.executor.advance(self.floor, path, run.time) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(agent = %run.agent, goal = %goal, %err, "walk aborted");
                return Walk::Blocked;
            }
        };
        run.extend_steps(outcome.log);
        match outcome.status {
            MoveStatus::Ok => Walk::Arrived,
            MoveStatus::StoreClosed => Walk::Closed,
            MoveStatus::NoPath => Walk::Blocked,
        }
    }
}
