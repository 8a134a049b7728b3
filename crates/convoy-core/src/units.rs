//! Unit systems and conversion constants.
//!
//! # The three unit systems
//!
//! | Quantity | external       | simulation            | force math |
//! |----------|----------------|-----------------------|------------|
//! | speed    | km/h (`i32`)   | speed units           | m/s (`Real`) |
//! | distance | —              | steps / yards         | metres (`Real`) |
//! | mass     | kg (`i64`)     | kg                    | kg |
//!
//! One speed unit is `SPEED_FACTOR / 1024` km/h; one step is
//! `2^YARDS_PER_STEP_SHIFT` yards; yards relate to metres through the speed
//! unit and `TIME_FACTOR` (a vehicle moving at one speed unit covers one
//! yard per `1/TIME_FACTOR` of a tick).  The caller's `time_scale` factor
//! (tile length in metres over the 1000 m standard tile) enters only at the
//! step boundary, in [`steps_to_x`]/[`x_to_steps`].
//!
//! Every conversion that returns an integer rounds **half up**: add
//! [`Real::HALF`], truncate.  Applied identically everywhere, this makes the
//! speed round-trip `v_to_speed(speed_to_v(s)) == s` exact for all
//! `0 <= s <= SPEED_UNLIMITED`.

use crate::real::Real;

// ── Scaling constants ─────────────────────────────────────────────────────────

/// km/h value of 1024 internal speed units.
pub const SPEED_FACTOR: i32 = 80;

/// One simulation step is `2^12 = 4096` yards.
pub const YARDS_PER_STEP_SHIFT: u32 = 12;

/// Yards per speed unit per tick.
pub const TIME_FACTOR: u32 = 64;

// ── Sentinels ─────────────────────────────────────────────────────────────────

/// "No speed limit".  Anything above this would overflow [`kmh_to_speed`].
pub const KMH_UNLIMITED: i32 = 300_000;

/// [`KMH_UNLIMITED`] expressed in speed units.
pub const SPEED_UNLIMITED: i32 = kmh_to_speed(KMH_UNLIMITED);

/// "No weight limit" result of the towable-weight calculations.
pub const KG_UNLIMITED: i64 = i64::MAX;

/// "Cannot stop" result of the braking-distance calculations (net braking
/// force non-positive, e.g. on a steep downhill).
pub const BRAKING_UNLIMITED_M: i64 = i64::MAX;

/// Slowest speed a powered convoy is integrated down to while accelerating;
/// keeps heavy convoys crawling instead of stalling at rounding zero.
pub const KMH_MIN: i32 = 4;

/// [`KMH_MIN`] in speed units.
pub const SPEED_MIN: i32 = kmh_to_speed(KMH_MIN);

// ── Conversion factors ────────────────────────────────────────────────────────

pub const KMH_TO_MS: Real = Real::from_ratio(10, 36);
pub const MS_TO_KMH: Real = Real::from_ratio(36, 10);

pub const SIMSPEED_TO_MS: Real = Real::from_ratio(10 * SPEED_FACTOR as u32, 36 * 1024);
pub const MS_TO_SIMSPEED: Real = Real::from_ratio(36 * 1024, 10 * SPEED_FACTOR as u32);

pub const YARDS_TO_M: Real =
    Real::from_ratio(10 * SPEED_FACTOR as u32, 36 * 1024 * TIME_FACTOR);
pub const M_TO_YARDS: Real =
    Real::from_ratio(36 * 1024 * TIME_FACTOR, 10 * SPEED_FACTOR as u32);

// ── Speed conversions ─────────────────────────────────────────────────────────

#[inline]
pub const fn kmh_to_speed(kmh: i32) -> i32 {
    (kmh * 1024) / SPEED_FACTOR
}

/// Rounds up so a speed-unit cap never under-reports the km/h it allows.
#[inline]
pub const fn speed_to_kmh(speed: i32) -> i32 {
    ((speed as i64 * SPEED_FACTOR as i64 + 1023) >> 10) as i32
}

/// Speed units → m/s.
#[inline]
pub fn speed_to_v(speed: i32) -> Real {
    SIMSPEED_TO_MS * Real::from(speed)
}

/// m/s → speed units, round half up.  `v` must be non-negative.
#[inline]
pub fn v_to_speed(v: Real) -> i32 {
    (MS_TO_SIMSPEED * v + Real::HALF).to_i32()
}

// ── Distance conversions ──────────────────────────────────────────────────────

/// Yards → metres.
#[inline]
pub fn yards_to_x(yards: i32) -> Real {
    YARDS_TO_M * Real::from(yards)
}

/// Metres → yards, round half up.  `x` must be non-negative.
#[inline]
pub fn x_to_yards(x: Real) -> i32 {
    (M_TO_YARDS * x + Real::HALF).to_i32()
}

/// Steps → metres under the caller's `time_scale` factor.
#[inline]
pub fn steps_to_x(time_scale: Real, steps: i32) -> Real {
    yards_to_x(steps << YARDS_PER_STEP_SHIFT) * time_scale
}

/// Metres → steps under the caller's `time_scale` factor.
#[inline]
pub fn x_to_steps(time_scale: Real, x: Real) -> i32 {
    x_to_yards(x / time_scale) >> YARDS_PER_STEP_SHIFT
}

// ── Integer square root ───────────────────────────────────────────────────────

/// `floor(sqrt(n))` by Newton iteration — deterministic, no floating point.
///
/// Used for the cos(alpha) leg of the weight-summary slope decomposition.
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    // Initial guess 2^ceil(bits/2) >= sqrt(n); Newton descends to the floor.
    let bits = 64 - n.leading_zeros();
    let mut x = 1u64 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}
