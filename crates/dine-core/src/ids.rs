//! Strongly typed, zero-cost identifier wrappers.
//!
//! Both IDs are `Copy + Ord + Hash`.  The inner integer is `pub` so tests can
//! build them directly, but callers should prefer `.index()` when indexing
//! into per-seat `Vec`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$noun` is the human-readable word used by `Display`, so error messages
/// read "fork 3" rather than a debug dump.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $noun:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($noun, " {}"), self.0)
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
    /// Seat index of a philosopher at the table, `0..seats`.
    pub struct PhilosopherId(u32) => "philosopher";
}

typed_id! {
    /// Index of a fork in the ring.  Fork `i` lies between philosophers
    /// `i - 1` and `i` (mod seats).
    pub struct ForkId(u32) => "fork";
}

/// First printable ASCII character (`!`).
const PRINTABLE_FIRST: u32 = 0x21;
/// Number of printable, non-space ASCII characters (`!` ..= `~`).
const PRINTABLE_SPAN: u32 = 94;

impl PhilosopherId {
    /// One-letter label used in the rendered header: `A`, `B`, … `Z`, then
    /// onward through printable ASCII, wrapping from `~` back to `!`.
    pub fn label(self) -> char {
        let offset = ('A' as u32 - PRINTABLE_FIRST + self.0 % PRINTABLE_SPAN) % PRINTABLE_SPAN;
        char::from_u32(PRINTABLE_FIRST + offset).unwrap_or('?')
    }
}
