//! The `Sim` struct and its cohort loop.

use rayon::prelude::*;
use tracing::info;

use sf_agent::{AgentOutcome, AgentProfile};
use sf_behavior::PurchaseModel;
use sf_core::{ShelfId, SimConfig, SimRng, SimTime};
use sf_mobility::MovementExecutor;
use sf_schedule::{Pacer, Scheduler};
use sf_spatial::{Catalog, FloorGrid, Pathfinder, ShelfIndex, StoreLayout};

use crate::aggregate::build_report;
use crate::{Floor, SharedFloor, SimObserver, SimReport, SimResult, StoreContext};

/// The main simulation runner.
///
/// A run goes through three phases:
///
/// 1. **Schedule**: assign arrival times from the run seed and split the
///    customers into Morning, Peak and Evening cohorts.
/// 2. **Cohorts**, in chronological order: clear the floor and queues, then
///    simulate every customer of the cohort concurrently on the worker pool.
///    A customer starts at `max(arrival, store clock)`; the store clock then
///    advances to the latest end time of the cohort.
/// 3. **Aggregate** the outcomes and counters into a [`SimReport`].
///
/// `run` takes `&self`: all mutable state is created per run, so a `Sim` can
/// be run repeatedly and, with one worker thread, reproduces its results.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: PurchaseModel, P: Pathfinder> {
    pub config:   SimConfig,
    pub layout:   StoreLayout,
    /// Customer profiles, indexed by `AgentId`.
    pub profiles: Vec<AgentProfile>,

    pub(crate) model:     M,
    pub(crate) executor:  MovementExecutor<P>,
    pub(crate) placed:    Vec<ShelfId>,
    pub(crate) catalog:   Catalog,
    pub(crate) shelves:   ShelfIndex,
    pub(crate) scheduler: Scheduler,
    pub(crate) pacer:     Pacer,
    pub(crate) pool:      rayon::ThreadPool,
}

impl<M: PurchaseModel, P: Pathfinder> Sim<M, P> {
    /// Shelves that made it onto the floor.
    pub fn placed_shelves(&self) -> &[ShelfId] {
        &self.placed
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the whole trading day.
    ///
    /// Calls observer hooks at every cohort boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&self, observer: &mut O) -> SimResult<SimReport> {
        let mut rng = SimRng::new(self.config.seed);
        let arrivals = self.scheduler.assign_arrivals(&self.profiles, &mut rng);
        let cohorts = self.scheduler.cohorts(&arrivals);

        info!(
            customers = self.profiles.len(),
            cohorts = cohorts.len(),
            seed = self.config.seed,
            "simulation started"
        );
        observer.on_run_start(self.profiles.len(), cohorts.len());

        let (width, height) = (self.config.grid.width, self.config.grid.height);
        let grid = FloorGrid::for_layout(&self.layout, &self.placed, width, height);
        let floor = Floor::new(SharedFloor::new(grid, self.layout.registers.len(), self.layout.shelves.len()));
        let ctx = StoreContext {
            config:   &self.config,
            layout:   &self.layout,
            catalog:  &self.catalog,
            shelves:  &self.shelves,
            model:    &self.model,
            executor: &self.executor,
            floor:    &floor,
        };

        let mut clock = self.config.hours.open;
        let mut previous_start: Option<SimTime> = None;
        let mut results: Vec<AgentOutcome> = Vec::with_capacity(self.profiles.len());

        for cohort in &cohorts {
            let start = cohort.first_arrival().map_or(clock, |first| first.max(clock));
            if let Some(previous) = previous_start {
                self.pacer.pause(start.since(previous));
            }
            previous_start = Some(start);

            floor.with(SharedFloor::reset_for_cohort);
            info!(cohort = %cohort.kind, size = cohort.len(), clock = %clock, "cohort started");
            observer.on_cohort_start(cohort, clock);

            let cohort_clock = clock;
            let outcomes: Vec<AgentOutcome> = self.pool.install(|| {
                cohort
                    .members
                    .par_iter()
                    .map(|&(arrival, agent)| {
                        ctx.simulate(agent, &self.profiles[agent.index()], arrival.max(cohort_clock))
                    })
                    .collect()
            });

            for outcome in &outcomes {
                clock = clock.max(outcome.end_time);
                observer.on_agent_finished(outcome);
            }
            info!(cohort = %cohort.kind, clock = %clock, "cohort finished");
            observer.on_cohort_end(cohort.kind, clock);
            results.extend(outcomes);
        }

        let shared = floor.into_inner();
        let report = build_report(results, &shared, &self.layout, &self.placed, &self.config.recommendations);
        info!(
            completed = report.statistics.completed,
            purchases = report.statistics.total_purchases,
            breakdowns = report.statistics.kassa_breakdowns,
            "simulation finished"
        );
        observer.on_run_end(&report);
        Ok(report)
    }
}
