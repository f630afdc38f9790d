//! `cl-core` — foundational types for the `crosslight` intersection twin.
//!
//! This crate is a dependency of every other `cl-*` crate.  It intentionally
//! has no `cl-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`lane`]   | `Lane`, `Axis`, `LaneTable<T>`, `ControllerKind`        |
//! | [`cycle`]  | `Cycle` — the control-cycle counter                     |
//! | [`rng`]    | `SimRng` — seeded, splittable simulation RNG            |
//! | [`config`] | `SimConfig` + tunable parameter groups with coercion    |
//! | [`error`]  | `ClError`, `ClResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod cycle;
pub mod error;
pub mod lane;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ArrivalRange, DischargePolicy, FeedbackParams, LossWeights, SimConfig,
};
pub use cycle::Cycle;
pub use error::{ClError, ClResult};
pub use lane::{Axis, ControllerKind, Lane, LaneTable};
pub use rng::SimRng;
