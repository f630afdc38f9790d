//! `cl-output` — file backends for simulation log rows.
//!
//! The simulation returns its rows in memory ([`cl_sim::RunReport`]); this
//! crate persists them.  A [`RunOutputObserver`] plugs any [`OutputWriter`]
//! backend into the cycle loop so rows stream to disk as they are emitted.
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`row`]      | Plain summary row types                         |
//! | [`writer`]   | The `OutputWriter` trait                        |
//! | [`csv`]      | CSV backend (one file per variant + summaries)  |
//! | [`observer`] | `CycleObserver` → `OutputWriter` bridge         |

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RunOutputObserver;
pub use row::CycleSummaryRow;
pub use writer::OutputWriter;
