//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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
    /// Index of a car in the building's car list.
    pub struct CarId(u16);
}

typed_id! {
    /// Index of a call in the building's append-only call history.
    pub struct CallId(u32);
}

typed_id! {
    /// Handle of a process registered with the scheduler.
    pub struct ProcessId(u32);
}

typed_id! {
    /// Handle of a FIFO channel owned by the scheduler.
    pub struct ChannelId(u32);
}

// ── CallIdAllocator ───────────────────────────────────────────────────────────

/// Hands out sequential [`CallId`]s.
///
/// Owned by whoever appends to the call history, so that ids always equal
/// history positions.
#[derive(Debug, Default, Clone)]
pub struct CallIdAllocator {
    next: u32,
}

impl CallIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next unused id.
    pub fn allocate(&mut self) -> CallId {
        let id = CallId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.next as usize
    }
}
