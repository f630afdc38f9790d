//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `adaptive_cycles.csv`
//! - `fixed_cycles.csv`
//! - `cycle_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use cl_core::ControllerKind;
use cl_sim::{CycleLogRow, LaneEvent};

use crate::writer::OutputWriter;
use crate::{CycleSummaryRow, OutputResult};

const LANE_HEADER: [&str; 17] = [
    "cycle", "lane", "phase", "allocated_secs", "used_secs", "wasted_secs",
    "arrivals", "queue_before", "queue_after", "uncleared", "red_secs",
    "loss_waiting", "loss_uncleared", "loss_queue", "loss_starvation",
    "loss_total", "event",
];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    adaptive:  Writer<File>,
    fixed:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut adaptive = Writer::from_path(dir.join("adaptive_cycles.csv"))?;
        adaptive.write_record(LANE_HEADER)?;

        let mut fixed = Writer::from_path(dir.join("fixed_cycles.csv"))?;
        fixed.write_record(LANE_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("cycle_summaries.csv"))?;
        summaries.write_record(["cycle", "adaptive_loss", "fixed_loss"])?;

        Ok(Self {
            adaptive,
            fixed,
            summaries,
            finished: false,
        })
    }
}

/// Compact single-field rendering of a [`LaneEvent`].
fn event_field(event: &LaneEvent) -> String {
    match event {
        LaneEvent::Normal => "normal".to_string(),
        LaneEvent::Emergency { class, position, cleared } => {
            let outcome = if *cleared { "cleared" } else { "stranded" };
            format!("{}@{position}:{outcome}", class.label())
        }
        LaneEvent::Recovery => "recovery".to_string(),
    }
}

impl OutputWriter for CsvWriter {
    fn write_lane_row(&mut self, kind: ControllerKind, row: &CycleLogRow) -> OutputResult<()> {
        let writer = match kind {
            ControllerKind::Adaptive => &mut self.adaptive,
            ControllerKind::Fixed => &mut self.fixed,
        };
        writer.write_record(&[
            row.cycle.0.to_string(),
            row.lane.to_string(),
            row.phase.to_string(),
            row.allocated_secs.to_string(),
            row.used_secs.to_string(),
            row.wasted_secs.to_string(),
            row.arrivals.to_string(),
            row.queue_before.to_string(),
            row.queue_after.to_string(),
            row.uncleared.to_string(),
            row.red_secs.to_string(),
            row.loss.waiting.to_string(),
            row.loss.uncleared.to_string(),
            row.loss.queue.to_string(),
            row.loss.starvation.to_string(),
            row.loss.total.to_string(),
            event_field(&row.event),
        ])?;
        Ok(())
    }

    fn write_cycle_summary(&mut self, row: &CycleSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.cycle.to_string(),
            row.adaptive_loss.to_string(),
            row.fixed_loss.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.adaptive.flush()?;
        self.fixed.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
