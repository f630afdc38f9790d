//! The `OutputWriter` trait implemented by backend writers.

use cl_core::ControllerKind;
use cl_sim::CycleLogRow;

use crate::{CycleSummaryRow, OutputResult};

/// Trait implemented by file-format backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`RunOutputObserver::take_error`][crate::RunOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one lane's row for one cycle under one controller variant.
    fn write_lane_row(&mut self, kind: ControllerKind, row: &CycleLogRow) -> OutputResult<()>;

    /// Write one cycle summary row.
    fn write_cycle_summary(&mut self, row: &CycleSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
