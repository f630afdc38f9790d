//! The control-cycle counter.
//!
//! One `Cycle` covers all four lanes once, for both controller variants.
//! Cycle indices are 1-based in log output (cycle 1 is the first simulated
//! round), matching how signal-timing plans are numbered in the field.

use std::fmt;

/// An absolute control-cycle counter.
///
/// Stored as `u32`: at a realistic 2–4 minutes of simulated time per cycle,
/// a u32 covers several thousand years of continuous operation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle(pub u32);

impl Cycle {
    /// The first simulated cycle.
    pub const FIRST: Cycle = Cycle(1);

    /// Return the cycle `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Cycle {
        Cycle(self.0 + n)
    }

    /// Advance to the next cycle.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}
