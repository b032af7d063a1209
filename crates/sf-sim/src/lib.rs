//! `sf-sim`: the store simulation engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`builder`]   | `SimBuilder`: validation and store indexing                     |
//! | [`sim`]       | `Sim`: scheduling, the cohort loop, the worker pool             |
//! | [`agent`]     | `StoreContext`: one customer's visit as a state machine         |
//! | [`checkout`]  | `RegisterQueue`, register choice, queue waiting time            |
//! | [`shared`]    | `SharedFloor` behind the one `Floor` lock, `GlobalStats`        |
//! | [`aggregate`] | `SimReport`, statistics, heatmap, shelf stats, recommendations  |
//! | [`observer`]  | `SimObserver` hooks, `NoopObserver`                             |
//! | [`error`]     | `SimError`, `SimResult<T>`                                      |
//!
//! # Run loop
//!
//! ```text
//! assign arrivals ─► cohorts (morning, peak, evening)
//! for cohort in chronological order:
//!   ① reset:  clear customers off the floor and out of the queues
//!   ② visits: every customer runs concurrently on the worker pool;
//!              each step takes the single floor lock
//!   ③ clock:  store clock advances to the cohort's latest end time
//! aggregate ─► SimReport
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sf_core::SimConfig;
//! use sf_sim::{NoopObserver, SimBuilder};
//! use sf_spatial::load_layout_json;
//!
//! let layout = load_layout_json(path)?;
//! let sim = SimBuilder::standard(SimConfig::default(), layout, profiles).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("{} completed", report.statistics.completed);
//! ```

pub mod agent;
pub mod aggregate;
pub mod builder;
pub mod checkout;
pub mod error;
pub mod observer;
pub mod shared;
pub mod sim;


pub use agent::StoreContext;
pub use aggregate::{PopularZone, RegisterStatistics, ShelfStatistics, SimReport, Statistics};
pub use builder::SimBuilder;
pub use checkout::RegisterQueue;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use shared::{Floor, GlobalStats, SharedFloor};
pub use sim::Sim;
