//! The `ConvoyModel` trait — per-variant hooks for the physics engine.

use crate::{AdverseSummary, FreightSummary, VehicleSummary, WeightSummary};

/// What a convoy variant must supply to the engine: summary rebuild hooks
/// and the force/power/brake curves.
///
/// The engine ([`Convoy`][crate::Convoy]) owns the cached summaries and
/// calls the `update_*` hooks only when a cached value is both invalid and
/// about to be read — implementations just overwrite `out` from their
/// vehicle source and never trigger recomputation themselves.
///
/// # Curve hooks
///
/// `force_kn`/`power_kw`/`brake_kn` take whole m/s (the engine truncates its
/// internal speed before the lookup) and return the summed convoy value in
/// kN/kW.  The engine's speed search assumes `force_kn` is non-increasing
/// in `v_ms`, which holds for anything derived from torque- and
/// power-limited vehicle curves.
pub trait ConvoyModel {
    /// Rebuild the vehicle summary from the current vehicle list.
    fn update_vehicle_summary(&self, out: &mut VehicleSummary);

    /// Rebuild the resistance coefficients for the current way/location.
    fn update_adverse_summary(&self, out: &mut AdverseSummary);

    /// Rebuild the freight min/max bounds from the current vehicle list.
    fn update_freight_summary(&self, out: &mut FreightSummary);

    /// Rebuild the live weight summary.  Only meaningful for variants with
    /// actual load state; the default leaves the cached value untouched.
    fn update_weight_summary(&self, out: &mut WeightSummary) {
        let _ = out;
    }

    /// Per-mille sin(slope angle) at the convoy's current location.
    /// Hypothetical convoys report flat ground (0).
    fn current_friction(&self) -> i16;

    /// Engine force available at `v_ms` m/s, kN.  `force_kn(0)` is the
    /// starting force (torque limit).
    fn force_kn(&self, v_ms: i32) -> i64;

    /// Engine power deliverable at `v_ms` m/s, kW.
    fn power_kw(&self, v_ms: i32) -> i64;

    /// Brake force applied at `v_ms` m/s, kN.
    fn brake_kn(&self, v_ms: i32) -> i64;
}
