//! `cl-control` — scoring and allocation for the intersection twin.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`loss`]     | Per-lane, per-cycle penalty decomposition               |
//! | [`feedback`] | The adaptive variant's per-lane learned weight          |
//! | [`fixed`]    | The static baseline schedule                            |
//! | [`adaptive`] | Cycle planning: preemption ordering, extensions, warm start |
//!
//! The [`loss`] terms serve double duty: they are reported in every log row
//! and they are the adaptive controller's training signal.

pub mod adaptive;
pub mod feedback;
pub mod fixed;
pub mod loss;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use adaptive::{AdaptiveScheduler, CyclePlan};
pub use feedback::{FeedbackController, LaneOutcome};
pub use fixed::FixedSchedule;
pub use loss::{holdovers, score, LossBreakdown, LossInputs};
