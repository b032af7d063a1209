//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use sf_agent::AgentProfile;
use sf_behavior::{AdditivePurchaseModel, PurchaseModel};
use sf_core::SimConfig;
use sf_mobility::MovementExecutor;
use sf_schedule::{Pacer, Scheduler};
use sf_spatial::{BfsPathfinder, Catalog, Pathfinder, ShelfIndex, StoreLayout};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, hours, grid, coefficients, …
/// - [`StoreLayout`]: shelves and registers
/// - the customers' [`AgentProfile`]s, indexed by `AgentId`
/// - `M: PurchaseModel`: the buying rule
/// - `P: Pathfinder`: the path search (e.g. [`BfsPathfinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                          |
/// |---------------|----------------------------------|
/// | `.pacer(p)`   | `Pacer::new(&config.pacing)`     |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config, layout, profiles, AdditivePurchaseModel::default(), BfsPathfinder)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: PurchaseModel, P: Pathfinder> {
    config:     SimConfig,
    layout:     StoreLayout,
    profiles:   Vec<AgentProfile>,
    model:      M,
    pathfinder: P,
    pacer:      Option<Pacer>,
}

impl SimBuilder<AdditivePurchaseModel, BfsPathfinder> {
    /// The standard setup: additive purchase model from `config.purchase`
    /// and breadth-first path search.
    pub fn standard(config: SimConfig, layout: StoreLayout, profiles: Vec<AgentProfile>) -> Self {
        let model = AdditivePurchaseModel::new(config.purchase.clone());
        Self::new(config, layout, profiles, model, BfsPathfinder)
    }
}

impl<M: PurchaseModel, P: Pathfinder> SimBuilder<M, P> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        layout:     StoreLayout,
        profiles:   Vec<AgentProfile>,
        model:      M,
        pathfinder: P,
    ) -> Self {
        Self { config, layout, profiles, model, pathfinder, pacer: None }
    }

    /// Override the real-time pacing between cohorts.
    pub fn pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Validate the configuration and layout, index the store, and return a
    /// ready-to-run [`Sim`].
    ///
    /// Fails on anything that would keep every customer from completing:
    /// invalid configuration, no registers, or a register off the floor.
    pub fn build(self) -> SimResult<Sim<M, P>> {
        self.config.validate()?;

        let (width, height) = (self.config.grid.width, self.config.grid.height);
        if self.layout.registers.is_empty() {
            return Err(SimError::Config("store layout has no registers".into()));
        }
        if let Some((i, register)) = self
            .layout
            .registers
            .iter()
            .enumerate()
            .find(|(_, r)| !r.cell().within(width, height))
        {
            return Err(SimError::Config(format!(
                "register {} at {} is outside the {width}x{height} floor",
                i + 1,
                register.cell()
            )));
        }

        let scheduler = Scheduler::new(self.config.hours, self.config.arrivals.clone())?;

        // ── Index the store ───────────────────────────────────────────────
        let placed = self.layout.placed_shelves(width, height);
        let catalog = Catalog::build(&self.layout, &placed);
        let shelves = ShelfIndex::build(&self.layout, &placed);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads.unwrap_or(0))
            .thread_name(|i| format!("sf-customer-{i}"))
            .build()?;

        info!(
            shelves = placed.len(),
            skipped = self.layout.shelves.len() - placed.len(),
            products = catalog.len(),
            registers = self.layout.registers.len(),
            customers = self.profiles.len(),
            threads = pool.current_num_threads(),
            "store indexed"
        );

        Ok(Sim {
            executor: MovementExecutor::from_config(self.pathfinder, &self.config),
            pacer:    self.pacer.unwrap_or_else(|| Pacer::new(&self.config.pacing)),
            config:   self.config,
            layout:   self.layout,
            profiles: self.profiles,
            model:    self.model,
            placed,
            catalog,
            shelves,
            scheduler,
            pool,
        })
    }
}
