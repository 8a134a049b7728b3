//! The convoy physics engine with its lazy summary cache.
//!
//! # Force balance
//!
//! For a land vehicle (and, with per-class constants, ships and aircraft):
//!
//! ```text
//! Fm = Ff + Frs + m·a
//!
//! Ff  = cf · v²                          air resistance
//! Frs = g · (fr·m·cos(α) + m·sin(α))     rolling + slope resistance
//! ```
//!
//! so the achievable acceleration is `a = (Fm − cf·v² − Frs) / m`.  The
//! engine force `Fm` is not analytic — it comes from the per-variant curve
//! hooks — so maximum-speed queries search the curve instead of solving a
//! closed form.
//!
//! # Caching
//!
//! Summaries and the two derived scalars (starting force, continuous power)
//! are memoized with independent validity flags.  The engine has no way to
//! observe composition or location changes; callers own the invalidation
//! hooks:
//!
//! - `invalidate_vehicle_summary` — vehicle list or a descriptor changed;
//!   also drops adverse, weight, starting force, and continuous power.
//! - `invalidate_adverse_summary` — way or location changed; also drops
//!   weight.
//! - `invalidate_freight_summary`, `invalidate_weight_summary` — load data
//!   changed.
//!
//! Every public query validates its dependency chain first
//! (validate-before-read), computing each missing value exactly once.

use convoy_core::{
    BRAKING_UNLIMITED_M, KG_UNLIMITED, KMH_MIN, KMH_TO_MS, Real, speed_to_v, v_to_speed,
    x_to_steps, x_to_yards,
};

use crate::model::ConvoyModel;
use crate::summary::{AdverseSummary, FreightSummary, VehicleSummary, WeightSummary};

/// `calc_move` integrates in sub-slices of at most this many milliseconds,
/// so acceleration is recomputed often enough for the explicit Euler step
/// to stay well-behaved.  Fixed: results are a pure function of the inputs,
/// but *not* invariant under a different tick subdivision.
pub const MOVE_SLICE_MS: i32 = 200;

/// Upper bound on the speed intervals the braking integration walks;
/// guarantees termination for pathological entry speeds.
pub const BRAKING_MAX_INTERVALS: i32 = 512;

const MS_TO_S: Real = Real::from_ratio(1, 1000);
const TWO: Real = Real::from_u32(2);

/// Outcome of one `calc_move` tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveResult {
    /// Speed after the tick, in speed units.
    pub speed: i32,

    /// Travel distance still ahead after the tick, in yards (floored at 0).
    pub remaining_yards: i32,
}

/// Independent validity flags for the cached values — the named-bool form
/// of the original's packed bitmask.
#[derive(Copy, Clone, Debug, Default)]
struct Validity {
    vehicle: bool,
    adverse: bool,
    freight: bool,
    weight: bool,
    starting_force: bool,
    continuous_power: bool,
}

/// The physics engine for one convoy, generic over the variant supplying
/// its vehicle data (see [`PotentialConvoy`][crate::PotentialConvoy] and
/// [`ExistingConvoy`][crate::ExistingConvoy]).
///
/// A `Convoy` is single-owner state: cross-thread sharing requires external
/// mutual exclusion, none is built in.
pub struct Convoy<M: ConvoyModel> {
    pub(crate) model: M,
    pub(crate) vehicle: VehicleSummary,
    pub(crate) adverse: AdverseSummary,
    pub(crate) freight: FreightSummary,
    pub(crate) weight: WeightSummary,
    starting_force_n: i64,
    continuous_power_w: i64,
    valid: Validity,
}

impl<M: ConvoyModel> Convoy<M> {
    /// Wrap a variant; all caches start invalid.
    pub fn new(model: M) -> Self {
        Self {
            model,
            vehicle: VehicleSummary::new(),
            adverse: AdverseSummary::new(),
            freight: FreightSummary::new(),
            weight: WeightSummary::new(),
            starting_force_n: 0,
            continuous_power_w: 0,
            valid: Validity::default(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the variant.  The cache cannot observe what you
    /// change — call the matching `invalidate_*` hooks afterwards.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    // ── Invalidation hooks ───────────────────────────────────────────────

    /// The vehicle list or a vehicle's descriptor changed.
    pub fn invalidate_vehicle_summary(&mut self) {
        self.valid.vehicle = false;
        self.valid.adverse = false;
        self.valid.weight = false;
        self.valid.starting_force = false;
        self.valid.continuous_power = false;
    }

    /// The way or location under the convoy changed.
    pub fn invalidate_adverse_summary(&mut self) {
        self.valid.adverse = false;
        self.valid.weight = false;
    }

    pub fn invalidate_freight_summary(&mut self) {
        self.valid.freight = false;
    }

    pub fn invalidate_weight_summary(&mut self) {
        self.valid.weight = false;
    }

    // ── Validate-before-read ─────────────────────────────────────────────
    //
    // The flag is set before the update hook runs, as in the original; a
    // hook that (indirectly) reads its own summary sees it as valid and
    // gets the stale value instead of recursing.

    pub(crate) fn validate_vehicle_summary(&mut self) {
        if !self.valid.vehicle {
            self.valid.vehicle = true;
            self.model.update_vehicle_summary(&mut self.vehicle);
        }
    }

    pub(crate) fn validate_adverse_summary(&mut self) {
        if !self.valid.adverse {
            self.valid.adverse = true;
            self.model.update_adverse_summary(&mut self.adverse);
        }
    }

    fn validate_freight_summary(&mut self) {
        if !self.valid.freight {
            self.valid.freight = true;
            self.model.update_freight_summary(&mut self.freight);
        }
    }

    pub(crate) fn validate_weight_summary(&mut self) {
        if !self.valid.weight {
            self.valid.weight = true;
            self.model.update_weight_summary(&mut self.weight);
        }
    }

    // ── Cached accessors ─────────────────────────────────────────────────

    pub fn vehicle_summary(&mut self) -> &VehicleSummary {
        self.validate_vehicle_summary();
        &self.vehicle
    }

    pub fn adverse_summary(&mut self) -> &AdverseSummary {
        self.validate_vehicle_summary();
        self.validate_adverse_summary();
        &self.adverse
    }

    pub fn freight_summary(&mut self) -> &FreightSummary {
        self.validate_freight_summary();
        &self.freight
    }

    /// The live weight summary (meaningful for variants that override the
    /// weight hook), validated through its full dependency chain.
    pub fn weight_summary(&mut self) -> &WeightSummary {
        self.validate_vehicle_summary();
        self.validate_adverse_summary();
        self.validate_weight_summary();
        &self.weight
    }

    /// Force available at standstill, N.
    pub fn starting_force_n(&mut self) -> i64 {
        self.validate_vehicle_summary();
        if !self.valid.starting_force {
            self.valid.starting_force = true;
            self.starting_force_n = self.model.force_kn(0) * 1000;
        }
        self.starting_force_n
    }

    /// Power sustainable at the convoy's top speed, W.
    pub fn continuous_power_w(&mut self) -> i64 {
        self.validate_vehicle_summary();
        if !self.valid.continuous_power {
            self.valid.continuous_power = true;
            let v_top = (KMH_TO_MS * Real::from(self.vehicle.max_speed_kmh) + Real::HALF).to_i32();
            self.continuous_power_w = self.model.power_kw(v_top) * 1000;
        }
        self.continuous_power_w
    }

    /// Per-mille sin(slope) at the convoy's current location — feed it to
    /// [`WeightSummary::from_weight`] for max-speed queries at arbitrary
    /// loads.
    pub fn current_friction(&self) -> i16 {
        self.model.current_friction()
    }

    // ── Force helpers ────────────────────────────────────────────────────

    /// Engine force at `v` m/s, N: the starting force at standstill, the
    /// curve lookup above it.
    fn force_n(&mut self, v: Real) -> i64 {
        let v_int = v.abs().to_i32();
        if v_int == 0 {
            self.starting_force_n()
        } else {
            self.model.force_kn(v_int) * 1000
        }
    }

    /// Brake force at `v` m/s, N.
    fn braking_force_n(&self, v: Real) -> i64 {
        self.model.brake_kn(v.abs().to_i32()) * 1000
    }

    /// True when the engine can hold `kmh` against air, rolling, and slope
    /// resistance (`frs` in N).
    fn can_hold(&mut self, kmh: i32, frs: Real) -> bool {
        let v = KMH_TO_MS * Real::from(kmh);
        let needed = self.adverse.cf * v * v + frs;
        Real::from_i64(self.force_n(v)) >= needed
    }

    /// Effective speed cap: the slower of vehicle design speeds and the way
    /// speed limit.
    fn speed_cap_kmh(&mut self) -> i32 {
        self.validate_vehicle_summary();
        self.validate_adverse_summary();
        self.vehicle.max_speed_kmh.min(self.adverse.max_speed_kmh)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Maximum sustainable speed in km/h for the given weight.
    ///
    /// Largest whole km/h at which the force curve still covers the total
    /// resistance, found by bisection (the curve is a black box); clipped
    /// to the speed cap.  Zero mass ⇒ the cap itself.
    pub fn calc_max_speed(&mut self, weight: &WeightSummary) -> i32 {
        let cap = self.speed_cap_kmh();
        if weight.weight_kg <= 0 || cap <= 0 {
            return cap.max(0);
        }

        let frs = rolling_slope_force_n(&self.adverse, weight);
        if self.can_hold(cap, frs) {
            return cap;
        }
        if !self.can_hold(1, frs) {
            return 0;
        }

        // lo holdable, hi not; cap ≤ 300000 bounds this to 19 halvings.
        let (mut lo, mut hi) = (1, cap);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.can_hold(mid, frs) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Maximum towable weight in kg at a per-mille slope factor.
    ///
    /// Binding constraint is the smaller of: force left at top speed under
    /// the continuous power budget, and the starting force.  A downhill at
    /// least as steep as the rolling resistance ⇒ [`KG_UNLIMITED`].
    pub fn calc_max_weight(&mut self, sin_alpha_millis: i32) -> i64 {
        let cap = self.speed_cap_kmh();
        if cap <= 0 {
            return 0;
        }
        let v_top = KMH_TO_MS * Real::from(cap);
        let at_power = Real::from_i64(self.continuous_power_w()) / v_top
            - self.adverse.cf * v_top * v_top;
        let force = at_power.min(Real::from_i64(self.starting_force_n()));
        self.weight_for_force(force, sin_alpha_millis)
    }

    /// Maximum weight movable from standstill (starting force only).
    pub fn calc_max_starting_weight(&mut self, sin_alpha_millis: i32) -> i64 {
        self.validate_vehicle_summary();
        self.validate_adverse_summary();
        let force = Real::from_i64(self.starting_force_n());
        self.weight_for_force(force, sin_alpha_millis)
    }

    fn weight_for_force(&self, force_n: Real, sin_alpha_millis: i32) -> i64 {
        if !force_n.is_positive() {
            return 0;
        }
        let denom =
            Real::GRAVITY * (self.adverse.fr + Real::from(sin_alpha_millis) * Real::MILLI);
        if !denom.is_positive() {
            return KG_UNLIMITED;
        }
        (force_n / denom + Real::HALF).to_i64()
    }

    /// Minimum stopping distance in metres from `v` m/s.
    ///
    /// Integrates brake force plus resistance against kinetic energy over
    /// descending speed intervals (`Δx = m·(v_hi² − v_lo²) / 2F`); interval
    /// width grows with the entry speed so the walk never exceeds
    /// [`BRAKING_MAX_INTERVALS`] rounds.  Returns [`BRAKING_UNLIMITED_M`]
    /// when the net braking force is not positive (runaway downhill).
    pub fn calc_min_braking_distance_m(&mut self, weight: &WeightSummary, v: Real) -> i64 {
        self.validate_vehicle_summary();
        self.validate_adverse_summary();
        if weight.weight_kg <= 0 || !v.is_positive() {
            return 0;
        }

        let frs = rolling_slope_force_n(&self.adverse, weight);
        let mass = Real::from_i64(weight.weight_kg);
        let step = Real::from((v.to_i32() / BRAKING_MAX_INTERVALS + 1).max(1));

        let mut distance = Real::ZERO;
        let mut v_hi = v;
        while v_hi.is_positive() {
            let v_lo = (v_hi - step).max(Real::ZERO);
            let v_mid = (v_hi + v_lo) * Real::HALF;
            let total = Real::from_i64(self.braking_force_n(v_mid))
                + frs
                + self.adverse.cf * v_mid * v_mid;
            if !total.is_positive() {
                return BRAKING_UNLIMITED_M;
            }
            distance += mass * (v_hi * v_hi - v_lo * v_lo) / (TWO * total);
            v_hi = v_lo;
        }
        (distance + Real::HALF).to_i64()
    }

    /// Minimum stopping distance in simulation steps from a speed in speed
    /// units, under the caller's `time_scale` factor.
    pub fn calc_min_braking_distance_steps(
        &mut self,
        time_scale: Real,
        weight: &WeightSummary,
        speed: i32,
    ) -> i32 {
        let metres = self.calc_min_braking_distance_m(weight, speed_to_v(speed));
        if metres == BRAKING_UNLIMITED_M {
            return i32::MAX;
        }
        x_to_steps(time_scale, Real::from_i64(metres))
    }

    /// Advance speed and remaining distance by one simulated tick.
    ///
    /// Per tick the convoy either brakes — because it is above
    /// `target_speed`, or because the distance to the next speed limit has
    /// shrunk to the precomputed braking distance (`steps_to_limit <=
    /// steps_to_brake`) — or applies the net engine force toward
    /// `target_speed`.  Integration is explicit Euler over
    /// [`MOVE_SLICE_MS`] sub-slices, clamped so the convoy neither
    /// overshoots the target nor, while under power, drops below the
    /// [`KMH_MIN`] crawl floor.
    ///
    /// Speeds are in speed units, distances in yards/steps, `delta_t_ms` in
    /// simulated milliseconds.  Zero mass ⇒ snap to `target_speed`.
    #[allow(clippy::too_many_arguments)]
    pub fn calc_move(
        &mut self,
        delta_t_ms: i32,
        time_scale: Real,
        weight: &WeightSummary,
        target_speed: i32,
        next_speed_limit: i32,
        steps_to_limit: i32,
        steps_to_brake: i32,
        current_speed: i32,
        remaining_yards: i32,
    ) -> MoveResult {
        self.validate_vehicle_summary();
        self.validate_adverse_summary();

        if delta_t_ms <= 0 {
            return MoveResult { speed: current_speed, remaining_yards };
        }

        if weight.weight_kg <= 0 {
            // Massless: snap to the target and coast there for the tick.
            let x = speed_to_v(target_speed) * Real::from(delta_t_ms) * MS_TO_S;
            return MoveResult {
                speed: target_speed,
                remaining_yards: advance(remaining_yards, x, time_scale),
            };
        }

        let frs = rolling_slope_force_n(&self.adverse, weight);
        let mass = Real::from_i64(weight.weight_kg);
        let v_target = speed_to_v(target_speed);
        let v_limit = speed_to_v(next_speed_limit);
        let v_min = KMH_TO_MS * Real::from(KMH_MIN);

        // Brake-early decision, committed for the whole tick: the caller's
        // precomputed braking distance says the limit is now or never.
        let braking_for_limit =
            current_speed > next_speed_limit && steps_to_limit <= steps_to_brake;

        let mut v = speed_to_v(current_speed);
        let mut x = Real::ZERO;
        let mut t_left_ms = delta_t_ms;
        while t_left_ms > 0 {
            let slice_ms = t_left_ms.min(MOVE_SLICE_MS);
            t_left_ms -= slice_ms;
            let dt = Real::from(slice_ms) * MS_TO_S;

            let resistance = self.adverse.cf * v * v + frs;
            if braking_for_limit || v > v_target {
                let floor = if braking_for_limit { v_limit.min(v_target) } else { v_target };
                let total = Real::from_i64(self.braking_force_n(v)) + resistance;
                if total.is_positive() {
                    v = (v - total / mass * dt).max(floor);
                }
                // else: downhill pull exceeds the brakes; speed holds.
            } else {
                let net = Real::from_i64(self.force_n(v)) - resistance;
                v = (v + net / mass * dt).min(v_target);
                if v < v_min {
                    // Powered convoys crawl instead of stalling at zero.
                    v = v_min.min(v_target);
                }
            }
            x += v * dt;
        }

        MoveResult {
            speed: v_to_speed(v),
            remaining_yards: advance(remaining_yards, x, time_scale),
        }
    }
}

// ── Free helpers ──────────────────────────────────────────────────────────────

/// Rolling plus slope resistance `Frs = g·(fr·m·cosα + m·sinα)` in N.
/// Negative on a downhill steep enough to outweigh rolling resistance.
fn rolling_slope_force_n(adverse: &AdverseSummary, weight: &WeightSummary) -> Real {
    Real::GRAVITY * (adverse.fr * weight.weight_cos + weight.weight_sin)
}

/// Subtract `x` metres (converted under `time_scale`) from a yard count.
fn advance(remaining_yards: i32, x: Real, time_scale: Real) -> i32 {
    let travelled = x_to_yards(x / time_scale);
    (remaining_yards - travelled).max(0)
}
