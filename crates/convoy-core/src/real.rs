//! Deterministic software floating-point number.
//!
//! # Design
//!
//! Convoy physics must produce bit-identical results on every peer of a
//! networked simulation, so no native `f32`/`f64` may participate in any
//! quantity that feeds back into game state (speed, position, braking
//! distance).  `Real` is a sign/mantissa/exponent triple computed entirely
//! with integer arithmetic:
//!
//!   value = ±mantissa × 2^exponent
//!
//! with a 32-bit mantissa kept normalized (top bit set) for every non-zero
//! value.  That gives ~9 decimal digits of precision over a huge dynamic
//! range — enough to hold anything from a rolling-resistance coefficient
//! (0.0015) to the kinetic energy of a loaded freight train.
//!
//! # Rounding
//!
//! Every arithmetic operation truncates toward zero in the last mantissa
//! bit.  The single canonical rounding rule for integer conversions is
//! **round half up**: add [`Real::HALF`], then truncate.  Because operation
//! error is always downward in magnitude, a multiply-by-constant followed by
//! multiply-by-inverse-constant lands strictly within half a unit below the
//! exact result, and the half-up conversion recovers it exactly — the unit
//! round-trip guarantee the conversion layer relies on.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Deterministic soft-float: ±mantissa × 2^exponent.
///
/// Non-zero values keep bit 31 of the mantissa set; zero is canonically
/// `{ mantissa: 0, exponent: 0, negative: false }`, so derived equality is
/// value equality.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Real {
    mantissa: u32,
    exponent: i16,
    negative: bool,
}

impl Real {
    pub const ZERO: Real = Real { mantissa: 0, exponent: 0, negative: false };
    pub const ONE:  Real = Real::from_u32(1);
    pub const HALF: Real = Real::from_ratio(1, 2);

    /// Standard gravity, 9.81 m/s².
    pub const GRAVITY: Real = Real::from_ratio(981, 100);

    /// 1/1000 — per-mille factors (slope encoding) to plain ratios.
    pub const MILLI: Real = Real::from_ratio(1, 1000);

    // ── Construction ─────────────────────────────────────────────────────

    /// Normalize `raw × 2^exp` into mantissa/exponent form.
    ///
    /// Truncates mantissa bits below the top 32 — downward in magnitude,
    /// like every other operation here.
    const fn normalize(raw: u64, exp: i32, negative: bool) -> Real {
        if raw == 0 {
            return Real::ZERO;
        }
        let lz = raw.leading_zeros();
        let mantissa = ((raw << lz) >> 32) as u32;
        Real {
            mantissa,
            exponent: (exp + 32 - lz as i32) as i16,
            negative,
        }
    }

    pub const fn from_u32(n: u32) -> Real {
        Real::normalize(n as u64, 0, false)
    }

    /// Exact rational constructor (truncated to 32 mantissa bits).
    ///
    /// `den` must be non-zero; all call sites pass literal constants.
    pub const fn from_ratio(num: u32, den: u32) -> Real {
        if num == 0 {
            return Real::ZERO;
        }
        let q = ((num as u64) << 32) / den as u64;
        Real::normalize(q, -32, false)
    }

    pub fn from_i64(n: i64) -> Real {
        Real::normalize(n.unsigned_abs(), 0, n < 0)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[inline]
    pub fn is_zero(self) -> bool {
        self.mantissa == 0
    }

    /// Strictly below zero.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.negative && self.mantissa != 0
    }

    /// Strictly above zero.
    #[inline]
    pub fn is_positive(self) -> bool {
        !self.negative && self.mantissa != 0
    }

    #[inline]
    pub fn abs(self) -> Real {
        Real { negative: false, ..self }
    }

    pub fn min(self, other: Real) -> Real {
        if self <= other { self } else { other }
    }

    pub fn max(self, other: Real) -> Real {
        if self >= other { self } else { other }
    }

    // ── Conversion out ───────────────────────────────────────────────────

    /// Truncate toward zero.  Saturates at the `i64` range limits.
    ///
    /// Round half up by adding [`Real::HALF`] first.
    pub fn to_i64(self) -> i64 {
        if self.mantissa == 0 {
            return 0;
        }
        let e = self.exponent as i32;
        let mag: u64 = if e > 31 {
            return if self.negative { i64::MIN } else { i64::MAX };
        } else if e >= 0 {
            (self.mantissa as u64) << e
        } else if e <= -32 {
            0
        } else {
            (self.mantissa >> -e) as u64
        };
        if self.negative { -(mag as i64) } else { mag as i64 }
    }

    /// Truncate toward zero, saturating at the `i32` range limits.
    pub fn to_i32(self) -> i32 {
        self.to_i64().clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Lossy `f64` view — for `Display`, demo output, and test assertions
    /// only.  Never feed the result back into simulation arithmetic.
    pub fn to_f64(self) -> f64 {
        let m = self.mantissa as f64 * (self.exponent as f64).exp2();
        if self.negative { -m } else { m }
    }

    // ── Magnitude helpers ────────────────────────────────────────────────

    /// Compare magnitudes of two non-zero values.
    fn cmp_magnitude(self, other: Real) -> Ordering {
        (self.exponent, self.mantissa).cmp(&(other.exponent, other.mantissa))
    }

    /// Sum of magnitudes; `negative` is the sign of the result.
    fn add_magnitude(a: Real, b: Real, negative: bool) -> Real {
        let (hi, lo) = if a.exponent >= b.exponent { (a, b) } else { (b, a) };
        let d = (hi.exponent - lo.exponent) as u32;
        if d >= 64 {
            return Real { negative, ..hi };
        }
        // Shift both up by 31 so the sum fits u64 even when it carries.
        let sum = ((hi.mantissa as u64) << 31) + (((lo.mantissa as u64) << 31) >> d);
        Real::normalize(sum, hi.exponent as i32 - 31, negative)
    }

    /// Difference of magnitudes; `hi` must have the larger magnitude.
    fn sub_magnitude(hi: Real, lo: Real, negative: bool) -> Real {
        let d = (hi.exponent - lo.exponent) as u32;
        let low = if d >= 64 { 0 } else { ((lo.mantissa as u64) << 31) >> d };
        let diff = ((hi.mantissa as u64) << 31) - low;
        Real::normalize(diff, hi.exponent as i32 - 31, negative)
    }
}

impl From<u32> for Real {
    fn from(n: u32) -> Real {
        Real::from_u32(n)
    }
}

impl From<i32> for Real {
    fn from(n: i32) -> Real {
        Real::normalize(n.unsigned_abs() as u64, 0, n < 0)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Add for Real {
    type Output = Real;

    fn add(self, rhs: Real) -> Real {
        if self.mantissa == 0 {
            return rhs;
        }
        if rhs.mantissa == 0 {
            return self;
        }
        if self.negative == rhs.negative {
            return Real::add_magnitude(self, rhs, self.negative);
        }
        match self.cmp_magnitude(rhs) {
            Ordering::Equal => Real::ZERO,
            Ordering::Greater => Real::sub_magnitude(self, rhs, self.negative),
            Ordering::Less => Real::sub_magnitude(rhs, self, rhs.negative),
        }
    }
}

impl Sub for Real {
    type Output = Real;

    #[inline]
    fn sub(self, rhs: Real) -> Real {
        self + (-rhs)
    }
}

impl Mul for Real {
    type Output = Real;

    fn mul(self, rhs: Real) -> Real {
        if self.mantissa == 0 || rhs.mantissa == 0 {
            return Real::ZERO;
        }
        let p = self.mantissa as u64 * rhs.mantissa as u64; // in [2^62, 2^64)
        let e = self.exponent as i32 + rhs.exponent as i32;
        let negative = self.negative != rhs.negative;
        if p >= 1 << 63 {
            Real { mantissa: (p >> 32) as u32, exponent: (e + 32) as i16, negative }
        } else {
            Real { mantissa: (p >> 31) as u32, exponent: (e + 31) as i16, negative }
        }
    }
}

impl Div for Real {
    type Output = Real;

    fn div(self, rhs: Real) -> Real {
        debug_assert!(rhs.mantissa != 0, "Real division by zero");
        if self.mantissa == 0 || rhs.mantissa == 0 {
            return Real::ZERO;
        }
        let q = ((self.mantissa as u64) << 32) / rhs.mantissa as u64; // in [2^31, 2^33)
        let e = self.exponent as i32 - rhs.exponent as i32;
        let negative = self.negative != rhs.negative;
        if q >= 1 << 32 {
            Real { mantissa: (q >> 1) as u32, exponent: (e - 31) as i16, negative }
        } else {
            Real { mantissa: q as u32, exponent: (e - 32) as i16, negative }
        }
    }
}

impl Neg for Real {
    type Output = Real;

    #[inline]
    fn neg(self) -> Real {
        if self.mantissa == 0 {
            Real::ZERO
        } else {
            Real { negative: !self.negative, ..self }
        }
    }
}

impl AddAssign for Real {
    #[inline]
    fn add_assign(&mut self, rhs: Real) {
        *self = *self + rhs;
    }
}

impl SubAssign for Real {
    #[inline]
    fn sub_assign(&mut self, rhs: Real) {
        *self = *self - rhs;
    }
}

impl MulAssign for Real {
    #[inline]
    fn mul_assign(&mut self, rhs: Real) {
        *self = *self * rhs;
    }
}

impl Mul<i32> for Real {
    type Output = Real;

    #[inline]
    fn mul(self, rhs: i32) -> Real {
        self * Real::from(rhs)
    }
}

impl Mul<Real> for i32 {
    type Output = Real;

    #[inline]
    fn mul(self, rhs: Real) -> Real {
        Real::from(self) * rhs
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

impl Ord for Real {
    fn cmp(&self, other: &Real) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => match (self.mantissa == 0, other.mantissa == 0) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => self.cmp_magnitude(*other),
            },
            (true, true) => other.cmp_magnitude(*self),
        }
    }
}

impl PartialOrd for Real {
    #[inline]
    fn partial_cmp(&self, other: &Real) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Real {
    #[inline]
    fn default() -> Real {
        Real::ZERO
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
