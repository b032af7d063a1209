//! Terminal outcome of one customer's visit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a visit ended.  Every customer ends in exactly one of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalStatus {
    /// Served at a register before closing.
    Completed,
    /// Balked at a full queue.
    LeftDueToQueue,
    /// The clock passed closing time.
    StoreClosed,
    /// No register to go to.
    NoKassa,
    NoPathToKassa,
    NoPathToShelf,
    /// The entrance row was fully occupied.
    NoStartPosition,
    /// The chosen register was out of service.
    KassaBroken,
}

impl TerminalStatus {
    pub const ALL: [TerminalStatus; 8] = [
        TerminalStatus::Completed,
        TerminalStatus::LeftDueToQueue,
        TerminalStatus::StoreClosed,
        TerminalStatus::NoKassa,
        TerminalStatus::NoPathToKassa,
        TerminalStatus::NoPathToShelf,
        TerminalStatus::NoStartPosition,
        TerminalStatus::KassaBroken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TerminalStatus::Completed => "completed",
            TerminalStatus::LeftDueToQueue => "left_due_to_queue",
            TerminalStatus::StoreClosed => "store_closed",
            TerminalStatus::NoKassa => "no_kassa",
            TerminalStatus::NoPathToKassa => "no_path_to_kassa",
            TerminalStatus::NoPathToShelf => "no_path_to_shelf",
            TerminalStatus::NoStartPosition => "no_start_position",
            TerminalStatus::KassaBroken => "kassa_broken",
        }
    }

    #[inline]
    pub fn is_completed(self) -> bool {
        self == TerminalStatus::Completed
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
