//! Unit tests for convoy-core primitives.

#[cfg(test)]
mod real {
    use crate::Real;

    #[test]
    fn exact_identities() {
        assert_eq!(Real::HALF + Real::HALF, Real::ONE);
        assert_eq!(Real::ONE * Real::HALF, Real::HALF);
        assert_eq!(Real::from(3) * Real::from(4), Real::from(12));
        assert_eq!(Real::from(10) / Real::from(4), Real::from_ratio(5, 2));
        assert_eq!(Real::from(7) - Real::from(7), Real::ZERO);
    }

    #[test]
    fn truncation_and_half_up() {
        let three_and_a_half = Real::from_ratio(7, 2);
        assert_eq!(three_and_a_half.to_i64(), 3); // truncates toward zero
        assert_eq!((three_and_a_half + Real::HALF).to_i64(), 4); // round half up
        assert_eq!((-three_and_a_half).to_i64(), -3);
    }

    #[test]
    fn signs() {
        let a = Real::from(-3);
        assert!(a.is_negative());
        assert!((-a).is_positive());
        assert_eq!(a.abs(), Real::from(3));
        assert_eq!(a + Real::from(5), Real::from(2));
        assert_eq!(a * Real::from(-2), Real::from(6));
        assert_eq!(Real::ZERO, -Real::ZERO);
    }

    #[test]
    fn ordering() {
        assert!(Real::HALF < Real::ONE);
        assert!(Real::from(-3) < Real::from(2));
        assert!(Real::from(-3) < Real::from(-2));
        assert!(Real::ZERO < Real::MILLI);
        assert_eq!(Real::from(5).max(Real::from(7)), Real::from(7));
        assert_eq!(Real::from(5).min(Real::from(7)), Real::from(5));
    }

    #[test]
    fn wide_magnitude_sums() {
        // Adding a tiny value to a huge one must not disturb the huge one
        // by more than one mantissa ulp.
        let huge = Real::from_i64(1 << 40);
        let tiny = Real::from_ratio(1, 1 << 20);
        let sum = huge + tiny;
        assert_eq!(sum.to_i64(), 1 << 40);
        assert!(sum >= huge);
    }

    #[test]
    fn saturating_conversion() {
        let too_big = Real::from_i64(i64::MAX) * Real::from(16);
        assert_eq!(too_big.to_i64(), i64::MAX);
        assert_eq!((-too_big).to_i64(), i64::MIN);
        assert_eq!(too_big.to_i32(), i32::MAX);
    }

    #[test]
    fn physical_constants() {
        assert!((Real::GRAVITY.to_f64() - 9.81).abs() < 1e-8);
        assert!((Real::MILLI.to_f64() - 0.001).abs() < 1e-12);
    }
}

#[cfg(test)]
mod units {
    use crate::units::*;
    use crate::Real;

    #[test]
    fn kmh_speed_scaling() {
        assert_eq!(kmh_to_speed(SPEED_FACTOR), 1024);
        assert_eq!(speed_to_kmh(1024), SPEED_FACTOR);
        assert_eq!(kmh_to_speed(0), 0);
        assert_eq!(SPEED_MIN, kmh_to_speed(KMH_MIN));
    }

    #[test]
    fn speed_roundtrip_is_exact() {
        // speed → m/s → speed must reproduce the input exactly for every
        // representable speed.  Sample across the full range.
        for s in [0, 1, 2, 51, 1024, 65_535, 1_000_000, SPEED_UNLIMITED] {
            assert_eq!(v_to_speed(speed_to_v(s)), s, "speed {s}");
        }
        let mut s = 1;
        while s < SPEED_UNLIMITED {
            assert_eq!(v_to_speed(speed_to_v(s)), s, "speed {s}");
            s = s * 3 + 7;
        }
    }

    #[test]
    fn yards_roundtrip_is_exact() {
        for y in [0, 1, 4096, 1 << 18, 1 << 24] {
            assert_eq!(x_to_yards(yards_to_x(y)), y, "yards {y}");
        }
    }

    #[test]
    fn steps_scale_with_time_factor() {
        let scale = Real::ONE;
        let one_step_m = steps_to_x(scale, 1);
        // 4096 yards at the standard tile scale: ~1.389 m per step.
        assert!((one_step_m.to_f64() - 4096.0 * (800.0 / 36864.0) / 64.0).abs() < 1e-3);
        assert_eq!(x_to_steps(scale, one_step_m), 1);

        // Halving the tile length halves the metres per step.
        let half = steps_to_x(Real::HALF, 1);
        assert!((half.to_f64() * 2.0 - one_step_m.to_f64()).abs() < 1e-6);
    }

    #[test]
    fn isqrt_floor() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(999_999), 999);
        assert_eq!(isqrt(1_000_000), 1000);
        assert_eq!(isqrt(u64::MAX), (1 << 32) - 1);
    }
}

#[cfg(test)]
mod way {
    use crate::{Real, WayType};

    #[test]
    fn resistance_tables() {
        assert_eq!(WayType::Rail.rolling_resistance(), Real::from_ratio(51, 10_000));
        assert_eq!(WayType::Road.rolling_resistance(), Real::from_ratio(15, 1_000));
        assert_eq!(WayType::Rail.air_resistance(), Real::from(13));
        assert_eq!(WayType::Road.air_resistance(), Real::from_ratio(252, 100));
        // Tram shares rail's rolling/air resistance but brakes like road.
        assert_eq!(WayType::Tram.air_resistance(), WayType::Rail.air_resistance());
        assert_eq!(WayType::Tram.brake_factor(), Real::ONE);
        assert_eq!(WayType::Water.brake_factor(), Real::from_ratio(1, 10));
    }

    #[test]
    fn label_roundtrip() {
        for w in [
            WayType::Road,
            WayType::Rail,
            WayType::Tram,
            WayType::Maglev,
            WayType::Water,
            WayType::Air,
        ] {
            assert_eq!(w.as_str().parse::<WayType>().unwrap(), w);
        }
        assert!("hyperloop".parse::<WayType>().is_err());
    }
}
