//! `sf-agent`: customer profiles and per-visit records.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`profile`] | `AgentProfile`: motives, fears, preferences, list, budget     |
//! | [`builder`] | `ProfileBuilder` (fluent construction)                        |
//! | [`loader`]  | `load_profiles_json`, `load_profiles_reader`                  |
//! | [`run`]     | `AgentRun`, `PathEntry`, `PathEvent`, `PurchaseRecord`, `AgentOutcome` |
//! | [`status`]  | `TerminalStatus`                                              |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                |

pub mod builder;
pub mod error;
pub mod loader;
pub mod profile;
pub mod run;
pub mod status;


pub use builder::ProfileBuilder;
pub use error::{AgentError, AgentResult};
pub use loader::{load_profiles_json, load_profiles_reader};
pub use profile::AgentProfile;
pub use run::{round3, AgentOutcome, AgentRun, EntryKind, PathEntry, PathEvent, PurchaseRecord};
pub use status::TerminalStatus;
