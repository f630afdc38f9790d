//! Plain data row types written by output backends.
//!
//! Lane-level rows come straight from [`cl_sim::CycleLogRow`]; only the
//! cycle-level summary needs its own shape here.

/// Both variants' losses for one completed cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSummaryRow {
    pub cycle:         u32,
    pub adaptive_loss: f64,
    pub fixed_loss:    f64,
}
