//! `cl-sim` — cycle orchestrator for the crosslight intersection twin.
//!
//! # The cycle loop
//!
//! ```text
//! for cycle in 1..=config.total_cycles:
//!   ① Arrivals   — one shared draw per lane, added to BOTH variants' queues.
//!   ② Emergencies — sample per-lane events, priority-sort them.
//!   ③ Plan       — adaptive: preemption order + extended allocations;
//!                  fixed: the static table in compass order.
//!   ④ Service    — discharge all four lanes per variant on that variant's
//!                  own clearance stream.
//!   ⑤ Score      — realized cycle length = Σ used; red = total − own used;
//!                  loss terms per lane; one log row per lane per variant.
//!   ⑥ Learn      — adaptive only: fold outcomes into the weights and
//!                  retarget next cycle's allocations.
//! ```
//!
//! Strictly single-threaded and sequential; a run owns all of its state and
//! RNG streams, so independent runs can execute in parallel with no
//! interference.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cl_core::SimConfig;
//! use cl_sim::{NoopObserver, Sim};
//!
//! let report = Sim::new(SimConfig::default()).run(&mut NoopObserver)?;
//! println!("adaptive {} vs fixed {}", report.adaptive_total_loss, report.fixed_total_loss);
//! ```

pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use observer::{CycleObserver, NoopObserver};
pub use report::{CycleLogRow, LaneEvent, RunReport};
pub use sim::Sim;
