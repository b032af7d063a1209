//! Per-visit records: the path log, the purchase log, and the final outcome.
//!
//! An [`AgentRun`] is owned by the one task simulating that customer and is
//! consumed into an [`AgentOutcome`] when the visit ends.

use std::fmt;

use serde::{Deserialize, Serialize};

use sf_core::{AgentId, Cell, SimTime};

use crate::TerminalStatus;

/// Round to three decimals for reporting.
#[inline]
pub fn round3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}

// ── Path log ──────────────────────────────────────────────────────────────────

/// Whether a path-log entry is a cell the customer walked into or an
/// annotation at the current position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Entered a cell; counted as one visit of that cell.
    Step,
    /// Event at the current position; no movement, no visit.
    Marker,
}

/// Something notable that happened at a path-log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathEvent {
    EnteredStore,
    ArrivedShelf {
        category:  String,
        item:      String,
        /// Purchase chance, rounded to three decimals.
        chance:    f64,
        purchased: bool,
    },
    SpontaneousPurchase {
        category: String,
        item:     String,
    },
    #[serde(rename = "kassa_broken")]
    RegisterBroken {
        /// 1-based register number.
        register: u32,
    },
    FinishedQueue {
        /// 1-based register number.
        register:  u32,
        waited_ms: u64,
    },
}

impl fmt::Display for PathEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEvent::EnteredStore => f.write_str("entered_store"),
            PathEvent::ArrivedShelf { category, item, purchased: true, .. } => {
                write!(f, "arrived_shelf ({category}); PURCHASED: {item}")
            }
            PathEvent::ArrivedShelf { category, item, purchased: false, .. } => {
                write!(f, "arrived_shelf ({category}); DID_NOT_BUY: {item}")
            }
            PathEvent::SpontaneousPurchase { category, item } => {
                write!(f, "spontaneous_purchase ({category}): {item}")
            }
            PathEvent::RegisterBroken { register } => write!(f, "kassa_broken at register {register}"),
            PathEvent::FinishedQueue { register, .. } => {
                write!(f, "finished queue at register {register}")
            }
        }
    }
}

/// One line of a customer's path log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub x:     i32,
    pub z:     i32,
    pub time:  SimTime,
    pub kind:  EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<PathEvent>,
}

impl PathEntry {
    pub fn step(cell: Cell, time: SimTime) -> Self {
        Self { x: cell.x, z: cell.z, time, kind: EntryKind::Step, event: None }
    }

    pub fn marker(cell: Cell, time: SimTime, event: PathEvent) -> Self {
        Self { x: cell.x, z: cell.z, time, kind: EntryKind::Marker, event: Some(event) }
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.z)
    }

    #[inline]
    pub fn is_step(&self) -> bool {
        self.kind == EntryKind::Step
    }
}

// ── Purchase log ──────────────────────────────────────────────────────────────

/// One evaluated product: a planned shelf visit or a spontaneous pick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub item:        String,
    pub category:    String,
    pub x:           i32,
    pub z:           i32,
    pub time:        SimTime,
    /// Probability used for the draw, rounded to three decimals.
    pub chance:      f64,
    pub purchased:   bool,
    pub spontaneous: bool,
}

// ── AgentRun ──────────────────────────────────────────────────────────────────

/// Mutable state of one visit in progress.
#[derive(Debug)]
pub struct AgentRun {
    pub agent:     AgentId,
    pub name:      String,
    pub arrival:   SimTime,
    pub position:  Cell,
    pub time:      SimTime,
    pub path:      Vec<PathEntry>,
    pub purchases: Vec<PurchaseRecord>,
}

impl AgentRun {
    pub fn new(agent: AgentId, name: impl Into<String>, arrival: SimTime) -> Self {
        Self {
            agent,
            name: name.into(),
            arrival,
            position: Cell::default(),
            time: arrival,
            path: Vec::new(),
            purchases: Vec::new(),
        }
    }

    /// Append walked cells and move the customer to the last of them.
    pub fn extend_steps(&mut self, steps: impl IntoIterator<Item = PathEntry>) {
        for entry in steps {
            self.position = entry.cell();
            self.time = self.time.max(entry.time);
            self.path.push(entry);
        }
    }

    /// Log an event at the current position and time.
    pub fn mark(&mut self, event: PathEvent) {
        self.path.push(PathEntry::marker(self.position, self.time, event));
    }

    /// Attach `event` to the last step when it is where the customer stands
    /// and carries no event yet; otherwise log it as a marker.
    pub fn annotate(&mut self, event: PathEvent) {
        match self.path.last_mut() {
            Some(last) if last.is_step() && last.event.is_none() && last.cell() == self.position => {
                last.event = Some(event);
            }
            _ => self.mark(event),
        }
    }

    pub fn record_purchase(&mut self, record: PurchaseRecord) {
        self.purchases.push(record);
    }

    /// Close the visit.
    pub fn finish(self, status: TerminalStatus) -> AgentOutcome {
        AgentOutcome {
            agent:     self.agent,
            client:    self.name,
            arrival:   self.arrival,
            path:      self.path,
            purchases: self.purchases,
            end_time:  self.time,
            status,
        }
    }
}

// ── AgentOutcome ──────────────────────────────────────────────────────────────

/// The retained summary of one finished visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub agent:     AgentId,
    pub client:    String,
    pub arrival:   SimTime,
    pub path:      Vec<PathEntry>,
    pub purchases: Vec<PurchaseRecord>,
    pub end_time:  SimTime,
    pub status:    TerminalStatus,
}

impl AgentOutcome {
    pub fn steps(&self) -> impl Iterator<Item = &PathEntry> {
        self.path.iter().filter(|e| e.is_step())
    }

    pub fn purchase_count(&self) -> usize {
        self.purchases.iter().filter(|p| p.purchased).count()
    }
}
