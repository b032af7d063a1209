//! Store layout: shelves, products and checkout registers.
//!
//! # JSON schema
//!
//! ```json
//! {
//!   "shelves": [
//!     { "category": "Dairy", "x": 4, "z": 6, "width": 2, "depth": 1,
//!       "attraction": 0.7,
//!       "products": [ { "id": 1, "name": "milk", "percent_discount": 10,
//!                       "time_discount_start": 36000, "time_discount_end": 43200 } ] }
//!   ],
//!   "registers": [ { "x": 18, "z": 1 } ]
//! }
//! ```
//!
//! `kasses` is accepted as an alias for `registers`.  `width` and `depth`
//! default to a single cell and `attraction` to a neutral 0.5, so layouts that
//! only place shelves as points still load.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use sf_core::{Cell, RegisterId, ShelfId, SimTime, MAX_GRID_DIM};

use crate::SpatialResult;

// ── ProductInfo ───────────────────────────────────────────────────────────────

/// One product stocked on a shelf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    /// Discount in percentage points (`10` = 10 % off).
    #[serde(default)]
    pub percent_discount: Option<f64>,
    /// Discount is only active from this time of day (inclusive).
    #[serde(default)]
    pub time_discount_start: Option<SimTime>,
    /// Discount is only active until this time of day (inclusive).
    #[serde(default)]
    pub time_discount_end: Option<SimTime>,
}

impl ProductInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            percent_discount: None,
            time_discount_start: None,
            time_discount_end: None,
        }
    }

    /// Builder-style helper for tests and demos.
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.percent_discount = Some(percent);
        self
    }

    /// The discount in effect at `now`, or `0.0` outside the discount window.
    pub fn discount_at(&self, now: SimTime) -> f64 {
        let percent = match self.percent_discount {
            Some(p) if p > 0.0 => p,
            _ => return 0.0,
        };
        let before_start = self.time_discount_start.is_some_and(|start| now < start);
        let after_end = self.time_discount_end.is_some_and(|end| now > end);
        if before_start || after_end { 0.0 } else { percent }
    }
}

// ── Shelf ─────────────────────────────────────────────────────────────────────

fn one() -> u32 {
    1
}

fn neutral_attraction() -> f64 {
    0.5
}

/// A footprint side length as a coordinate offset.
#[inline]
fn extent(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// A rectangular shelf unit.
///
/// The footprint covers `(x + i, z + j)` for `i < width`, `j < depth`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub category: String,
    pub x: i32,
    pub z: i32,
    #[serde(default = "one")]
    pub width: u32,
    #[serde(default = "one")]
    pub depth: u32,
    /// How strongly the shelf draws passers-by, in `[0, 1]`.
    #[serde(default = "neutral_attraction")]
    pub attraction: f64,
    #[serde(default)]
    pub products: Vec<ProductInfo>,
}

impl Shelf {
    /// A 1x1 shelf with neutral attraction and no products.
    pub fn new(category: impl Into<String>, origin: Cell) -> Self {
        Self {
            category: category.into(),
            x: origin.x,
            z: origin.z,
            width: 1,
            depth: 1,
            attraction: neutral_attraction(),
            products: Vec::new(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Cell {
        Cell::new(self.x, self.z)
    }

    /// Inclusive far corner of the footprint.  Saturates instead of
    /// overflowing, so an oversized shelf lands off any floor.
    #[inline]
    pub fn far_corner(&self) -> Cell {
        Cell::new(
            self.x.saturating_add((extent(self.width) - 1).max(0)),
            self.z.saturating_add((extent(self.depth) - 1).max(0)),
        )
    }

    /// Every cell covered by the shelf.
    pub fn footprint(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..extent(self.width))
            .flat_map(move |i| (0..extent(self.depth)).map(move |j| Cell::new(self.x + i, self.z + j)))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let far = self.far_corner();
        (self.x..=far.x).contains(&cell.x) && (self.z..=far.z).contains(&cell.z)
    }

    /// Manhattan distance from `cell` to the nearest footprint cell.
    pub fn distance_to(&self, cell: Cell) -> u32 {
        let far = self.far_corner();
        let dx = (self.x - cell.x).max(cell.x - far.x).max(0) as u32;
        let dz = (self.z - cell.z).max(cell.z - far.z).max(0) as u32;
        dx + dz
    }

    /// `true` if the whole footprint lies on a `width x height` floor.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        (1..=MAX_GRID_DIM).contains(&self.width)
            && (1..=MAX_GRID_DIM).contains(&self.depth)
            && self.origin().within(width, height)
            && self.far_corner().within(width, height)
    }
}

// ── Register ──────────────────────────────────────────────────────────────────

/// A checkout register occupying one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub x: i32,
    pub z: i32,
}

impl Register {
    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.z)
    }
}

impl From<Cell> for Register {
    fn from(cell: Cell) -> Self {
        Register { x: cell.x, z: cell.z }
    }
}

// ── StoreLayout ───────────────────────────────────────────────────────────────

/// The immutable floor plan of one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    #[serde(default)]
    pub shelves: Vec<Shelf>,
    #[serde(default, alias = "kasses")]
    pub registers: Vec<Register>,
}

impl StoreLayout {
    pub fn from_json_str(s: &str) -> SpatialResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    #[inline]
    pub fn shelf(&self, id: ShelfId) -> &Shelf {
        &self.shelves[id.index()]
    }

    #[inline]
    pub fn register(&self, id: RegisterId) -> &Register {
        &self.registers[id.index()]
    }

    /// Shelves that can take part in a run on a `width x height` floor.
    ///
    /// Shelves whose footprint leaves the floor, that have an empty footprint,
    /// or whose attraction is not in `[0, 1]` are left out with a warning.
    pub fn placed_shelves(&self, width: u32, height: u32) -> Vec<ShelfId> {
        let mut placed = Vec::with_capacity(self.shelves.len());
        for (i, shelf) in self.shelves.iter().enumerate() {
            let id = ShelfId(i as u32);
            if !shelf.fits_within(width, height) {
                warn!(
                    shelf = %id,
                    category = %shelf.category,
                    origin = %shelf.origin(),
                    "shelf footprint lies outside the {width}x{height} floor; excluded"
                );
                continue;
            }
            if !(0.0..=1.0).contains(&shelf.attraction) {
                warn!(
                    shelf = %id,
                    attraction = shelf.attraction,
                    "shelf attraction outside [0, 1]; excluded"
                );
                continue;
            }
            placed.push(id);
        }
        placed
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Read a layout from a JSON file.
pub fn load_layout_json(path: &Path) -> SpatialResult<StoreLayout> {
    let file = std::fs::File::open(path)?;
    load_layout_reader(std::io::BufReader::new(file))
}

/// Read a layout from any JSON byte stream.
pub fn load_layout_reader<R: Read>(reader: R) -> SpatialResult<StoreLayout> {
    Ok(serde_json::from_reader(reader)?)
}
