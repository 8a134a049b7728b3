//! Aggregated snapshots of convoy state.
//!
//! Summaries are plain value objects derived from a vehicle list and its
//! environment.  They have no identity of their own: a convoy owns them as
//! cached derivations and silently rebuilds them whenever the governing
//! inputs change (see the invalidation cascade in [`crate::Convoy`]).

use convoy_catalog::VehicleDesc;
use convoy_core::{KMH_UNLIMITED, Real, WayType, isqrt};

/// Car units per track tile (vehicle lengths are stored in sixteenths).
pub const CARUNITS_PER_TILE: u32 = 16;

/// Tail correction treats the last vehicle as at least half a tile long.
const HALF_TILE_UNITS: u32 = CARUNITS_PER_TILE / 2;

// ── VehicleSummary ────────────────────────────────────────────────────────────

/// Aggregate of the vehicle list: total length, tile footprint, unladen
/// weight, and the convoy-wide speed cap (minimum of the vehicles' design
/// top speeds).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSummary {
    /// Sum of vehicle lengths in car units.
    pub length_units: u32,

    /// Convoy length in whole tiles, after [`finalize`](Self::finalize).
    pub tiles: u32,

    /// Sum of unladen vehicle weights, kg.
    pub weight_kg: i64,

    /// Minimum of all vehicles' design top speeds, km/h.
    /// [`KMH_UNLIMITED`] while the list is empty — no vehicle, no limit.
    pub max_speed_kmh: i32,
}

impl VehicleSummary {
    pub fn new() -> Self {
        Self {
            length_units: 0,
            tiles: 0,
            weight_kg: 0,
            max_speed_kmh: KMH_UNLIMITED,
        }
    }

    pub fn add(&mut self, desc: &VehicleDesc) {
        self.length_units += desc.length_units;
        self.weight_kg += desc.weight_kg as i64;
        self.max_speed_kmh = self.max_speed_kmh.min(desc.max_speed_kmh);
    }

    /// Compute the tile footprint once all vehicles are added.
    ///
    /// `tail_length_units` is the length of the last vehicle; the footprint
    /// rounds it up to half a tile so a convoy never appears to fit a
    /// platform it overhangs.
    pub fn finalize(&mut self, tail_length_units: u32) {
        let correction = tail_length_units.max(HALF_TILE_UNITS) - tail_length_units;
        self.tiles = (self.length_units + correction).div_ceil(CARUNITS_PER_TILE);
    }
}

impl Default for VehicleSummary {
    fn default() -> Self {
        Self::new()
    }
}

// ── AdverseSummary ────────────────────────────────────────────────────────────

/// Environment resistance coefficients, selected by the dominant way type
/// the convoy travels on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdverseSummary {
    /// Air-resistance constant `cf = cw/2 × A × rho`, N·s²/m².
    pub cf: Real,

    /// Rolling-resistance coefficient `fr` (dimensionless).
    pub fr: Real,

    /// Brake-force factor for vehicles without explicit brake data.
    pub br: Real,

    /// Way speed limit, km/h; [`KMH_UNLIMITED`] if the way imposes none.
    pub max_speed_kmh: i32,
}

impl AdverseSummary {
    pub fn new() -> Self {
        Self {
            cf: Real::ZERO,
            fr: Real::ZERO,
            br: Real::ZERO,
            max_speed_kmh: KMH_UNLIMITED,
        }
    }

    /// Coefficients for a way class, no speed limit.
    pub fn for_way(way: WayType) -> Self {
        Self {
            cf: way.air_resistance(),
            fr: way.rolling_resistance(),
            br: way.brake_factor(),
            max_speed_kmh: KMH_UNLIMITED,
        }
    }

    /// Tighten the way speed limit.
    pub fn cap_speed(&mut self, kmh: i32) {
        self.max_speed_kmh = self.max_speed_kmh.min(kmh);
    }
}

impl Default for AdverseSummary {
    fn default() -> Self {
        Self::new()
    }
}

// ── FreightSummary ────────────────────────────────────────────────────────────

/// Bounds on the freight mass the convoy can be loaded with — goods of the
/// same category differ in per-unit weight, so planning queries work with a
/// min/max range instead of an actual load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreightSummary {
    pub min_freight_kg: i64,
    pub max_freight_kg: i64,
}

impl FreightSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, desc: &VehicleDesc) {
        self.min_freight_kg += desc.min_freight_kg();
        self.max_freight_kg += desc.max_freight_kg();
    }
}

// ── WeightSummary ─────────────────────────────────────────────────────────────

/// The resolved mass at the moment of calculation, decomposed along the
/// slope: raw kilograms, kilograms × cos(alpha) (normal force for rolling
/// resistance), kilograms × sin(alpha) (downhill force component).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightSummary {
    /// Vehicle plus freight weight, kg.
    pub weight_kg: i64,

    /// Weight scaled by cos(slope angle), kg.
    pub weight_cos: Real,

    /// Weight scaled by sin(slope angle), kg.  Negative downhill.
    pub weight_sin: Real,
}

impl WeightSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-shot constructor: `sin_alpha_millis` is 1000 × sin(alpha),
    /// e.g. 50 for a 50 per-mille incline; negative values are downhill.
    pub fn from_weight(kg: i64, sin_alpha_millis: i32) -> Self {
        let mut summary = Self::new();
        summary.add_weight(kg, sin_alpha_millis);
        summary
    }

    /// Accumulate `kg` on a stretch with the given per-mille slope factor.
    ///
    /// `sin_alpha_millis` must be within ±1000 (|sin| ≤ 1); per-vehicle
    /// friction factors from the game sit roughly between -14 and 50.
    pub fn add_weight(&mut self, kg: i64, sin_alpha_millis: i32) {
        debug_assert!(sin_alpha_millis.unsigned_abs() <= 1000);
        let sin = sin_alpha_millis.clamp(-1000, 1000);
        // 1000·cos(alpha) from 1000·sin(alpha), integer square root.
        let cos = isqrt((1_000_000 - sin as i64 * sin as i64) as u64) as u32;

        self.weight_kg += kg;
        self.weight_sin += Real::from_i64(kg) * Real::from(sin) * Real::MILLI;
        self.weight_cos += Real::from_i64(kg) * Real::from(cos) * Real::MILLI;
    }
}
