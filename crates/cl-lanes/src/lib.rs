//! `cl-lanes` — the physical layer of the intersection twin.
//!
//! Everything here models what happens *on the pavement*, independent of
//! which controller is in charge:
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`arrivals`]  | Stochastic per-lane arrival counts with demand spikes  |
//! | [`discharge`] | Green-time clearance: batching, flushing, early cut    |
//! | [`emergency`] | Emergency-vehicle sampling and priority ordering       |
//!
//! All randomness flows through [`cl_core::SimRng`] streams owned by the
//! caller, so every function here is deterministic given its stream.

pub mod arrivals;
pub mod discharge;
pub mod emergency;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arrivals::sample_arrivals;
pub use discharge::{discharge, Clearance, LanePhase};
pub use emergency::{required_green_secs, sample_events, EvClass, EvEvent};
