//! `sf-spatial`: store layout, floor occupancy, and path search.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`layout`]      | `StoreLayout`, `Shelf`, `Register`, `ProductInfo`, JSON loaders |
//! | [`catalog`]     | `Catalog`: case-insensitive item name to shelf lookup    |
//! | [`grid`]        | `FloorGrid`: fixtures, agent occupancy, visit counters   |
//! | [`pathfinder`]  | `Pathfinder` trait, `GridPath`, `BfsPathfinder`          |
//! | [`shelf_index`] | `ShelfIndex`: R-tree of shelf footprints                 |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                       |

pub mod catalog;
pub mod error;
pub mod grid;
pub mod layout;
pub mod pathfinder;
pub mod shelf_index;


pub use catalog::{Catalog, CatalogEntry};
pub use error::{SpatialError, SpatialResult};
pub use grid::FloorGrid;
pub use layout::{load_layout_json, load_layout_reader, ProductInfo, Register, Shelf, StoreLayout};
pub use pathfinder::{BfsPathfinder, GridPath, Pathfinder};
pub use shelf_index::ShelfIndex;
