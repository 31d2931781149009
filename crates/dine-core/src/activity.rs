//! What a philosopher is doing right now.

use std::fmt;

/// A philosopher's visible activity.
///
/// Acquiring and releasing forks are both shown as `Transitioning`; the
/// forks themselves tell the two apart.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Activity {
    Eating = 0,
    Thinking = 1,
    #[default]
    Transitioning = 2,
}

impl Activity {
    /// Compact encoding for atomic storage.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a value produced by [`as_u8`][Self::as_u8].  Unknown values
    /// decode as `Transitioning`.
    #[inline]
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Activity::Eating,
            1 => Activity::Thinking,
            _ => Activity::Transitioning,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Activity::Eating        => "eating",
            Activity::Thinking      => "thinking",
            Activity::Transitioning => "transitioning",
        })
    }
}
