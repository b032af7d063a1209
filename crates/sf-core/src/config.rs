//! Run configuration.
//!
//! Every heuristic coefficient of the simulation lives here with a documented
//! default, so a store operator can tune behaviour from a TOML file without
//! touching code.  All sections are `#[serde(default)]`: a file only needs the
//! keys it overrides.
//!
//! ```toml
//! seed = 7
//! num_threads = 4
//!
//! [hours]
//! open  = "09:00"
//! close = "21:00"
//!
//! [checkout]
//! max_queue_length = 3
//! ```
//!
//! [`SimConfig::validate`] rejects configurations under which no customer
//! could ever complete a visit; the simulation builder calls it before any
//! agent starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Cell, CoreError, CoreResult, SimTime, StoreHours};

/// Upper bound on either grid dimension.  Keeps `i32` cell arithmetic safe.
pub const MAX_GRID_DIM: u32 = 10_000;

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Master RNG seed.  The same seed, layout and profiles reproduce a run.
    pub seed: u64,

    /// Worker threads for the cohort thread pool.  `None` uses all logical
    /// cores; `Some(1)` gives a fully reproducible interleaving.
    pub num_threads: Option<usize>,

    pub hours:           StoreHours,
    pub grid:            GridConfig,
    pub movement:        MovementConfig,
    pub purchase:        PurchaseConfig,
    pub spontaneous:     SpontaneousConfig,
    pub checkout:        CheckoutConfig,
    pub arrivals:        ArrivalConfig,
    pub recommendations: RecommendationConfig,
    pub pacing:          PacingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:            42,
            num_threads:     None,
            hours:           StoreHours::default(),
            grid:            GridConfig::default(),
            movement:        MovementConfig::default(),
            purchase:        PurchaseConfig::default(),
            spontaneous:     SpontaneousConfig::default(),
            checkout:        CheckoutConfig::default(),
            arrivals:        ArrivalConfig::default(),
            recommendations: RecommendationConfig::default(),
            pacing:          PacingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a TOML document.  Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> CoreResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every section for values that make the run meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        if self.hours.close <= self.hours.open {
            return Err(CoreError::Config(format!(
                "closing time {} is not after opening time {}",
                self.hours.close, self.hours.open
            )));
        }
        self.grid.validate()?;
        self.purchase.validate()?;
        self.spontaneous.validate()?;
        self.checkout.validate()?;
        self.arrivals.validate(&self.hours)?;
        Ok(())
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

/// Floor grid geometry and walking speed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells along x.  Default: 20.
    pub width: u32,
    /// Cells along z.  Default: 20.
    pub height: u32,
    /// Preferred entry cell.  Default: `(0, 0)`.
    pub entrance: Cell,
    /// Time to cross one cell, in milliseconds.  Default: 600.
    pub cell_duration_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { width: 20, height: 20, entrance: Cell::new(0, 0), cell_duration_ms: 600 }
    }
}

impl GridConfig {
    fn validate(&self) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::Config(format!(
                "grid size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.width > MAX_GRID_DIM || self.height > MAX_GRID_DIM {
            return Err(CoreError::Config(format!(
                "grid size {}x{} exceeds {MAX_GRID_DIM}x{MAX_GRID_DIM}",
                self.width, self.height
            )));
        }
        if !self.entrance.within(self.width, self.height) {
            return Err(CoreError::Config(format!(
                "entrance {} lies outside the {}x{} grid",
                self.entrance, self.width, self.height
            )));
        }
        if self.cell_duration_ms == 0 {
            return Err(CoreError::Config("cell_duration_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Re-routing behaviour of the movement executor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Re-plans allowed per walk when the next cell is blocked.  Default: 8.
    pub max_reroutes: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { max_reroutes: 8 }
    }
}

/// Coefficients of the additive purchase-probability model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseConfig {
    /// Base chance before shelf-quality scaling.  Default: 0.2.
    pub base_chance: f64,
    /// Added when a value-seeking motive meets a discounted product.  Default: 0.3.
    pub motive_bonus: f64,
    /// Subtracted when a no-discount fear meets an undiscounted product.  Default: 0.3.
    pub fear_penalty: f64,
    /// Added per 10 percentage points of discount.  Default: 0.1.
    pub discount_bonus_per_10: f64,
    /// Added when the product is in the customer's preference list.  Default: 0.1.
    pub preference_bonus: f64,
    /// Multiplies the budget fraction allocated to the category.  Default: 0.2.
    pub budget_bonus_factor: f64,
    /// Customers only walk to a shelf at or above this chance.  Default: 0.3.
    pub min_chance_to_approach: f64,
    /// Shelf quality of a never-visited shelf.  Default: 0.5.
    pub min_shelf_quality: f64,
    /// Arrivals after which a shelf counts as fully discovered.  Default: 10.
    pub discovery_visits: u64,
    /// Motive substrings signalling value-seeking (case-insensitive).
    pub value_seeking_keywords: Vec<String>,
    /// Fear substrings signalling dislike of undiscounted goods (case-insensitive).
    pub no_discount_fear_keywords: Vec<String>,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            base_chance:               0.2,
            motive_bonus:              0.3,
            fear_penalty:              0.3,
            discount_bonus_per_10:     0.1,
            preference_bonus:          0.1,
            budget_bonus_factor:       0.2,
            min_chance_to_approach:    0.3,
            min_shelf_quality:         0.5,
            discovery_visits:          10,
            value_seeking_keywords:    vec!["cheap".into(), "дешево".into()],
            no_discount_fear_keywords: vec!["no discount".into(), "нет скидок".into()],
        }
    }
}

impl PurchaseConfig {
    fn validate(&self) -> CoreResult<()> {
        let coefficients = [
            ("base_chance", self.base_chance),
            ("motive_bonus", self.motive_bonus),
            ("fear_penalty", self.fear_penalty),
            ("discount_bonus_per_10", self.discount_bonus_per_10),
            ("preference_bonus", self.preference_bonus),
            ("budget_bonus_factor", self.budget_bonus_factor),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "purchase.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        unit_interval("purchase.min_chance_to_approach", self.min_chance_to_approach)?;
        unit_interval("purchase.min_shelf_quality", self.min_shelf_quality)?;
        if self.discovery_visits == 0 {
            return Err(CoreError::Config("purchase.discovery_visits must be at least 1".into()));
        }
        Ok(())
    }
}

/// Unplanned purchases near attractive shelves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpontaneousConfig {
    /// Only shelves with attraction strictly above this qualify.  Default: 0.5.
    pub attraction_threshold: f64,
    /// Purchase probability is `attraction * factor`.  Default: 0.3.
    pub factor: f64,
}

impl Default for SpontaneousConfig {
    fn default() -> Self {
        Self { attraction_threshold: 0.5, factor: 0.3 }
    }
}

impl SpontaneousConfig {
    fn validate(&self) -> CoreResult<()> {
        unit_interval("spontaneous.attraction_threshold", self.attraction_threshold)?;
        unit_interval("spontaneous.factor", self.factor)
    }
}

/// Register queues and service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Customers balk when the chosen queue holds this many.  Default: 5.
    pub max_queue_length: usize,
    /// Service time per queued customer, in milliseconds.  Default: 10 000.
    pub service_time_ms: u64,
    /// Chance the chosen register is out of service.  Default: 0.01.
    pub breakdown_probability: f64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self { max_queue_length: 5, service_time_ms: 10_000, breakdown_probability: 0.01 }
    }
}

impl CheckoutConfig {
    fn validate(&self) -> CoreResult<()> {
        if self.max_queue_length == 0 {
            return Err(CoreError::Config("checkout.max_queue_length must be at least 1".into()));
        }
        unit_interval("checkout.breakdown_probability", self.breakdown_probability)
    }
}

/// Arrival-time distribution for profiles that do not carry one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    /// Start of the rush window.  Default: 12:00.
    pub peak_start: SimTime,
    /// End of the rush window.  Default: 14:00.
    pub peak_end: SimTime,
    /// Share of customers arriving during the rush.  Default: 0.4.
    pub peak_fraction: f64,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            peak_start:    SimTime::from_hms(12, 0, 0),
            peak_end:      SimTime::from_hms(14, 0, 0),
            peak_fraction: 0.4,
        }
    }
}

impl ArrivalConfig {
    fn validate(&self, hours: &StoreHours) -> CoreResult<()> {
        unit_interval("arrivals.peak_fraction", self.peak_fraction)?;
        if !(hours.open <= self.peak_start
            && self.peak_start <= self.peak_end
            && self.peak_end <= hours.close)
        {
            return Err(CoreError::Config(format!(
                "peak window {}..{} must lie within opening hours {}..{}",
                self.peak_start, self.peak_end, hours.open, hours.close
            )));
        }
        Ok(())
    }
}

/// Thresholds used when deriving layout recommendations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// A shelf below `ratio * average visits` is flagged as hard to find.  Default: 0.5.
    pub low_visit_ratio: f64,
    /// A shelf below `ratio * average conversion` is flagged as unconvincing.  Default: 0.5.
    pub low_conversion_ratio: f64,
    /// A shelf above `ratio * average visits` with at least average
    /// conversion is flagged as a hot spot.  Default: 1.5.
    pub high_visit_ratio: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self { low_visit_ratio: 0.5, low_conversion_ratio: 0.5, high_visit_ratio: 1.5 }
    }
}

/// Optional real-time pacing between cohorts.
///
/// Presentation only: pacing sleeps the scheduler thread, it never changes
/// simulated time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Wall-clock seconds slept per simulated second between cohorts.
    /// Default: 0 (no pacing).
    pub realtime_scale: f64,
    /// Cap on any single pause, in milliseconds.  Default: 2 000.
    pub max_pause_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { realtime_scale: 0.0, max_pause_ms: 2_000 }
    }
}

fn unit_interval(name: &str, value: f64) -> CoreResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must lie in [0, 1], got {value}")))
    }
}
