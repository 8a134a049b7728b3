//! Force-balance physics for vehicle convoys.
//!
//! The engine answers two families of questions about a convoy (a coupled
//! chain of vehicles on one way class): advisory queries — maximum speed,
//! towable weight, braking distance — and the per-tick movement update the
//! simulation loop runs.  All arithmetic routes through the deterministic
//! [`Real`][convoy_core::Real] soft-float, so results are identical on
//! every platform.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | `summary`   | Aggregated snapshots: vehicle, adverse, freight, weight |
//! | `model`     | [`ConvoyModel`], the variant hooks the engine consumes |
//! | `convoy`    | [`Convoy`], the cached engine and its queries          |
//! | `potential` | [`PotentialConvoy`], planning over catalog descriptors |
//! | `existing`  | [`LiveConvoy`]/[`ExistingConvoy`], world-backed convoys |

mod convoy;
mod existing;
mod model;
mod potential;
mod summary;


pub use convoy::{BRAKING_MAX_INTERVALS, Convoy, MOVE_SLICE_MS, MoveResult};
pub use existing::{ExistingConvoy, LiveConvoy};
pub use model::ConvoyModel;
pub use potential::PotentialConvoy;
pub use summary::{
    AdverseSummary, CARUNITS_PER_TILE, FreightSummary, VehicleSummary, WeightSummary,
};
