//! Way types and their tabulated resistance constants.
//!
//! The way a convoy travels on decides three coefficients of the force
//! balance:
//!
//! - `cf` — air-resistance constant, `cw/2 × A × rho` (drag coefficient,
//!   largest cross-section, air density) folded into one per-class number;
//! - `fr` — rolling-resistance coefficient (steel on rail ≪ tyre on road);
//! - `br` — brake-force factor applied to a vehicle's tonnage when its
//!   descriptor carries no explicit brake force.
//!
//! The values are game-balance calibrated rather than strictly physical
//! (rail `fr` is ~3× the textbook 0.0015) and are part of the deterministic
//! contract: changing them changes every peer's simulation.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::real::Real;

// cf: air resistance per way class.
const CF_RAIL:   Real = Real::from_u32(13);
const CF_MAGLEV: Real = Real::from_u32(10);
const CF_ROAD:   Real = Real::from_ratio(252, 100);
const CF_WATER:  Real = Real::from_u32(25);
const CF_AIR:    Real = Real::from_u32(1);

// fr: rolling resistance per way class.
const FR_RAIL:   Real = Real::from_ratio(51, 10_000);
const FR_MAGLEV: Real = Real::from_ratio(15, 10_000);
const FR_ROAD:   Real = Real::from_ratio(15, 1_000);
const FR_WATER:  Real = Real::from_ratio(1, 1_000);
const FR_AIR:    Real = Real::from_ratio(1, 1_000);

// br: default brake factor per way class.
const BR_RAIL:   Real = Real::from_ratio(1, 2);
const BR_TRAM:   Real = Real::ONE;
const BR_MAGLEV: Real = Real::from_ratio(12, 10);
const BR_ROAD:   Real = Real::ONE;
const BR_WATER:  Real = Real::from_ratio(1, 10);
const BR_AIR:    Real = Real::from_u32(2);

/// The infrastructure class a convoy travels on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum WayType {
    /// Roads and everything without dedicated infrastructure.
    #[default]
    Road,
    /// Railways, including narrow gauge.
    Rail,
    /// Tram and monorail track (rail resistance, road-grade brakes).
    Tram,
    /// Magnetic levitation track.
    Maglev,
    /// Rivers, canals, open water.
    Water,
    /// Air lanes.
    Air,
}

impl WayType {
    /// Air-resistance constant `cf` for this way class.
    pub fn air_resistance(self) -> Real {
        match self {
            WayType::Road => CF_ROAD,
            WayType::Rail | WayType::Tram => CF_RAIL,
            WayType::Maglev => CF_MAGLEV,
            WayType::Water => CF_WATER,
            WayType::Air => CF_AIR,
        }
    }

    /// Rolling-resistance coefficient `fr` for this way class.
    pub fn rolling_resistance(self) -> Real {
        match self {
            WayType::Road => FR_ROAD,
            WayType::Rail | WayType::Tram => FR_RAIL,
            WayType::Maglev => FR_MAGLEV,
            WayType::Water => FR_WATER,
            WayType::Air => FR_AIR,
        }
    }

    /// Default brake-force factor `br` (kN per tonne of unladen weight) for
    /// vehicles whose descriptor carries no explicit brake force.
    pub fn brake_factor(self) -> Real {
        match self {
            WayType::Road => BR_ROAD,
            WayType::Rail => BR_RAIL,
            WayType::Tram => BR_TRAM,
            WayType::Maglev => BR_MAGLEV,
            WayType::Water => BR_WATER,
            WayType::Air => BR_AIR,
        }
    }

    /// Label used in catalog CSV files and trace output.
    pub fn as_str(self) -> &'static str {
        match self {
            WayType::Road => "road",
            WayType::Rail => "rail",
            WayType::Tram => "tram",
            WayType::Maglev => "maglev",
            WayType::Water => "water",
            WayType::Air => "air",
        }
    }
}

impl FromStr for WayType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<WayType, CoreError> {
        match s {
            "road" => Ok(WayType::Road),
            "rail" => Ok(WayType::Rail),
            "tram" => Ok(WayType::Tram),
            "maglev" => Ok(WayType::Maglev),
            "water" => Ok(WayType::Water),
            "air" => Ok(WayType::Air),
            other => Err(CoreError::UnknownWayType(other.to_string())),
        }
    }
}

impl fmt::Display for WayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
