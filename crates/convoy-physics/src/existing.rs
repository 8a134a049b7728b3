//! Convoys that exist in a running world.
//!
//! The engine never reaches into game state directly; the world object
//! implements [`LiveConvoy`] and an [`ExistingConvoy`] adapter feeds it to
//! the physics.  Unlike the planning variant, an existing convoy has an
//! actual freight load and a location, so its weight summary is live data
//! rather than a hypothetical.

use convoy_catalog::VehicleDesc;
use convoy_core::{KMH_UNLIMITED, Real, WayType};

use crate::convoy::{Convoy, MoveResult};
use crate::model::ConvoyModel;
use crate::summary::{AdverseSummary, FreightSummary, VehicleSummary, WeightSummary};

/// The world-side view of a convoy the engine computes for.
///
/// Implementors report composition, load, and location; they also own the
/// moment of change and must call the matching `refresh_*` hook on the
/// wrapping [`Convoy`] when any of these move under the engine.
pub trait LiveConvoy {
    /// Visit every vehicle front to back with its current freight load in
    /// kg.  Drives all composition- and load-derived summaries.
    fn for_each_vehicle(&self, f: &mut dyn FnMut(&VehicleDesc, i64));

    /// The way class the convoy currently travels on.
    fn way(&self) -> WayType;

    /// Speed limit of the current way, km/h.
    fn way_speed_limit_kmh(&self) -> i32 {
        KMH_UNLIMITED
    }

    /// Per-mille sin(slope angle) at the current location; negative is
    /// downhill.
    fn sin_alpha_millis(&self) -> i16 {
        0
    }
}

/// Adapter presenting a [`LiveConvoy`] to the engine.
pub struct ExistingConvoy<C: LiveConvoy> {
    live: C,
}

impl<C: LiveConvoy> ConvoyModel for ExistingConvoy<C> {
    fn update_vehicle_summary(&self, out: &mut VehicleSummary) {
        *out = VehicleSummary::new();
        let mut tail_length = 0;
        self.live.for_each_vehicle(&mut |desc, _| {
            out.add(desc);
            tail_length = desc.length_units;
        });
        if out.length_units > 0 {
            out.finalize(tail_length);
        }
    }

    fn update_adverse_summary(&self, out: &mut AdverseSummary) {
        *out = AdverseSummary::for_way(self.live.way());
        out.cap_speed(self.live.way_speed_limit_kmh());
    }

    fn update_freight_summary(&self, out: &mut FreightSummary) {
        *out = FreightSummary::new();
        self.live.for_each_vehicle(&mut |desc, _| out.add(desc));
    }

    fn update_weight_summary(&self, out: &mut WeightSummary) {
        *out = WeightSummary::new();
        let sin = i32::from(self.live.sin_alpha_millis());
        self.live.for_each_vehicle(&mut |desc, freight_kg| {
            out.add_weight(i64::from(desc.weight_kg) + freight_kg, sin);
        });
    }

    fn current_friction(&self) -> i16 {
        self.live.sin_alpha_millis()
    }

    fn force_kn(&self, v_ms: i32) -> i64 {
        let mut total = 0;
        self.live.for_each_vehicle(&mut |desc, _| total += desc.force_kn(v_ms));
        total
    }

    fn power_kw(&self, v_ms: i32) -> i64 {
        let mut total = 0;
        self.live.for_each_vehicle(&mut |desc, _| total += desc.power_kw(v_ms));
        total
    }

    fn brake_kn(&self, _v_ms: i32) -> i64 {
        let br = self.live.way().brake_factor();
        let mut total = 0;
        self.live.for_each_vehicle(&mut |desc, _| total += desc.brake_kn(br));
        total
    }
}

impl<C: LiveConvoy> Convoy<ExistingConvoy<C>> {
    /// Wrap a world convoy and compute all summaries up front, so the first
    /// movement tick pays no validation cost.
    pub fn attach(live: C) -> Self {
        let mut convoy = Convoy::new(ExistingConvoy { live });
        convoy.weight_summary();
        convoy.freight_summary();
        convoy
    }

    pub fn live(&self) -> &C {
        &self.model.live
    }

    /// Mutable access to the world object; follow any change with the
    /// matching `refresh_*` hook.
    pub fn live_mut(&mut self) -> &mut C {
        &mut self.model.live
    }

    // ── Change notifications ─────────────────────────────────────────────

    /// Vehicles were coupled, uncoupled, or upgraded.
    pub fn refresh_composition(&mut self) {
        self.invalidate_vehicle_summary();
        self.invalidate_freight_summary();
    }

    /// The convoy moved onto a different way or slope.
    pub fn refresh_location(&mut self) {
        self.invalidate_adverse_summary();
    }

    /// Freight was loaded or unloaded.
    pub fn refresh_load(&mut self) {
        self.invalidate_freight_summary();
        self.invalidate_weight_summary();
    }

    // ── Movement at the live load ────────────────────────────────────────

    /// [`Convoy::calc_move`] at the live weight summary.
    #[allow(clippy::too_many_arguments)]
    pub fn calc_move_loaded(
        &mut self,
        delta_t_ms: i32,
        time_scale: Real,
        target_speed: i32,
        next_speed_limit: i32,
        steps_to_limit: i32,
        steps_to_brake: i32,
        current_speed: i32,
        remaining_yards: i32,
    ) -> MoveResult {
        let weight = self.weight_summary().clone();
        self.calc_move(
            delta_t_ms,
            time_scale,
            &weight,
            target_speed,
            next_speed_limit,
            steps_to_limit,
            steps_to_brake,
            current_speed,
            remaining_yards,
        )
    }

    /// [`Convoy::calc_max_speed`] at the live weight summary.
    pub fn max_speed_loaded(&mut self) -> i32 {
        let weight = self.weight_summary().clone();
        self.calc_max_speed(&weight)
    }

    /// Stopping distance in steps from the current speed at the live load.
    pub fn braking_distance_steps(&mut self, time_scale: Real, speed: i32) -> i32 {
        let weight = self.weight_summary().clone();
        self.calc_min_braking_distance_steps(time_scale, &weight, speed)
    }
}
