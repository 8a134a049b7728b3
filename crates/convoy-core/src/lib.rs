//! `convoy-core` — foundational types for the `rust_convoy` physics
//! workspace.
//!
//! This crate is a dependency of every other `convoy-*` crate.  It has no
//! `convoy-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`real`]   | `Real` — deterministic soft-float for all physics math    |
//! | [`units`]  | speed/distance unit systems, conversions, sentinels       |
//! | [`way`]    | `WayType` and the per-class resistance tables             |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Determinism
//!
//! Everything here is integer arithmetic.  The same inputs produce
//! bit-identical outputs on every platform, which is what lets independent
//! peers of a networked simulation stay in sync without exchanging state.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod real;
pub mod units;
pub mod way;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use real::Real;
pub use units::{
    BRAKING_UNLIMITED_M, KG_UNLIMITED, KMH_MIN, KMH_TO_MS, KMH_UNLIMITED, MS_TO_KMH, SPEED_FACTOR,
    SPEED_MIN, SPEED_UNLIMITED, TIME_FACTOR, YARDS_PER_STEP_SHIFT, isqrt, kmh_to_speed,
    speed_to_kmh, speed_to_v, steps_to_x, v_to_speed, x_to_steps, x_to_yards, yards_to_x,
};
pub use way::WayType;
