//! Strongly typed identifier wrappers.
//!
//! Agents, shelves and registers are all addressed by their position in the
//! input lists (`profiles[i]`, `layout.shelves[i]`, `layout.registers[i]`).
//! The wrappers keep those three index spaces from being mixed up while still
//! allowing direct `Vec` indexing through `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a simulated customer in the run's profile list.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a shelf in `StoreLayout::shelves`.
    pub struct ShelfId(u32);
}

typed_id! {
    /// Index of a checkout register in `StoreLayout::registers`.
    ///
    /// Reported 1-based to humans, stored 0-based.
    pub struct RegisterId(u32);
}

impl RegisterId {
    /// 1-based register number used in path-log events and reports.
    #[inline]
    pub fn number(self) -> u32 {
        self.0 + 1
    }
}
