//! Static vehicle descriptors and their engine/brake curves.
//!
//! A `VehicleDesc` is read-only catalog data: the physics engine only ever
//! queries it, never mutates it.  The force/power curves are derived on the
//! fly from three numbers — rated power, maximum tractive force, and gear —
//! rather than stored as sampled tables: force is torque-limited at low
//! speed and power-limited above the crossover speed.

use convoy_core::{Real, WayType};

/// A gear ratio of 1.0 is stored as 64.
pub const GEAR_FACTOR: u32 = 64;

/// Read-only description of one vehicle model.
///
/// Lengths are in car units (1/16 of a track tile).  Weights are unladen
/// kilograms; the freight fields bound what a full load can add.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleDesc {
    pub name: String,
    pub way: WayType,

    /// Length in car units (16 per tile).
    pub length_units: u32,

    /// Unladen weight in kg.
    pub weight_kg: u32,

    /// Design top speed in km/h.
    pub max_speed_kmh: i32,

    /// Rated engine power in kW (0 for unpowered wagons).
    pub power_kw: u32,

    /// Maximum tractive force in kN (torque limit at low speed).
    pub tractive_force_kn: u32,

    /// Gear ratio scaled by [`GEAR_FACTOR`]; 64 = 1.0.
    pub gear: u32,

    /// Brake force in kN.  `None` means "no brake data" — the physics layer
    /// falls back to the way-type brake factor times the unladen tonnage.
    pub brake_force_kn: Option<u32>,

    /// Freight capacity in units.
    pub capacity: u32,

    /// Lightest possible freight unit, kg.
    pub min_unit_weight_kg: u32,

    /// Heaviest possible freight unit, kg.
    pub max_unit_weight_kg: u32,
}

impl VehicleDesc {
    /// Engine force in kN available at `v_ms` m/s.
    ///
    /// Torque-limited at low speed (the full tractive force, also the
    /// starting force at `v = 0`), power-limited above the crossover
    /// (`P / v`), with the gear ratio applied to the result.
    pub fn force_kn(&self, v_ms: i32) -> i64 {
        let v = v_ms.max(0) as i64;
        let base = if v == 0 {
            self.tractive_force_kn as i64
        } else {
            (self.tractive_force_kn as i64).min(self.power_kw as i64 / v)
        };
        base * self.gear as i64 / GEAR_FACTOR as i64
    }

    /// Engine power in kW deliverable at `v_ms` m/s.
    ///
    /// Power-limited at speed, force-limited below the crossover
    /// (`F_max × v`), gear applied.  Zero at standstill.
    pub fn power_kw(&self, v_ms: i32) -> i64 {
        let v = v_ms.max(0) as i64;
        let base = (self.power_kw as i64).min(self.tractive_force_kn as i64 * v);
        base * self.gear as i64 / GEAR_FACTOR as i64
    }

    /// Brake force in kN, falling back to `br × unladen tonnage` for
    /// descriptors without explicit brake data.
    pub fn brake_kn(&self, br: Real) -> i64 {
        match self.brake_force_kn {
            Some(kn) => kn as i64,
            None => (br * Real::from(self.weight_kg / 1000) + Real::HALF).to_i64(),
        }
    }

    /// Lightest full load in kg.
    #[inline]
    pub fn min_freight_kg(&self) -> i64 {
        self.capacity as i64 * self.min_unit_weight_kg as i64
    }

    /// Heaviest full load in kg.
    #[inline]
    pub fn max_freight_kg(&self) -> i64 {
        self.capacity as i64 * self.max_unit_weight_kg as i64
    }
}
