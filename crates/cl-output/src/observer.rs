//! `RunOutputObserver<W>` — bridges `CycleObserver` to an `OutputWriter`.

use cl_core::{ControllerKind, Cycle};
use cl_sim::{CycleLogRow, CycleObserver, RunReport};

use crate::row::CycleSummaryRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`CycleObserver`] that streams lane rows and cycle summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `CycleObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RunOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> CycleObserver for RunOutputObserver<W> {
    fn on_lane_serviced(&mut self, kind: ControllerKind, row: &CycleLogRow) {
        let result = self.writer.write_lane_row(kind, row);
        self.store_err(result);
    }

    fn on_cycle_end(&mut self, cycle: Cycle, adaptive_loss: f64, fixed_loss: f64) {
        let row = CycleSummaryRow {
            cycle: cycle.0,
            adaptive_loss,
            fixed_loss,
        };
        let result = self.writer.write_cycle_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _report: &RunReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
