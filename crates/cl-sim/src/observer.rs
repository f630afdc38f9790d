//! Observer trait for progress reporting and data collection.

use cl_core::{ControllerKind, Cycle};

use crate::report::{CycleLogRow, RunReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// cycle loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl CycleObserver for ProgressPrinter {
///     fn on_cycle_end(&mut self, cycle: Cycle, adaptive_loss: f64, fixed_loss: f64) {
///         println!("{cycle}: adaptive {adaptive_loss:.0} fixed {fixed_loss:.0}");
///     }
/// }
/// ```
pub trait CycleObserver {
    /// Called at the very start of each cycle, before arrivals.
    fn on_cycle_start(&mut self, _cycle: Cycle) {}

    /// Called once per lane per variant, immediately after the lane's row
    /// is finalized.  Rows arrive in service order.
    fn on_lane_serviced(&mut self, _kind: ControllerKind, _row: &CycleLogRow) {}

    /// Called at the end of each cycle with both variants' cycle losses.
    fn on_cycle_end(&mut self, _cycle: Cycle, _adaptive_loss: f64, _fixed_loss: f64) {}

    /// Called once after the final cycle completes.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`CycleObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl CycleObserver for NoopObserver {}
