//! Numeric helpers shared by the normalizer and the step generators.
//!
//! This module provides the small pieces of dosing arithmetic:
//! - Clamping readings into their physical domain
//! - Measuring how far a reading sits outside a band
//! - Rounding product quantities to whole grams / millilitres

/// Clamp a reading into `[low, high]`, with `high = None` meaning unbounded.
///
/// Non-finite values are pulled to a bound: `+inf` to `high` when one
/// exists, everything else (`NaN`, `-inf`, unbounded `+inf`) to `low`.
pub fn clamp_reading(value: f64, low: f64, high: Option<f64>) -> f64 {
    if value.is_nan() {
        return low;
    }
    if value.is_infinite() {
        return match high {
            Some(h) if value > 0.0 => h,
            _ => low,
        };
    }
    let floored = value.max(low);
    match high {
        Some(h) => floored.min(h),
        None => floored,
    }
}

/// Amount by which `value` falls short of `floor` (zero when at or above it).
pub fn shortfall(value: f64, floor: f64) -> f64 {
    (floor - value).max(0.0)
}

/// Distance from `value` to the nearest edge of `[low, high]`; zero inside.
pub fn distance_outside(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        low - value
    } else if value > high {
        value - high
    } else {
        0.0
    }
}

/// Round a product quantity to the nearest whole unit.
///
/// Negative and non-finite quantities round to zero; very large ones
/// saturate at `u32::MAX`.
pub fn round_amount(quantity: f64) -> u32 {
    if !quantity.is_finite() || quantity <= 0.0 {
        return 0;
    }
    quantity.round().min(u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_reading() {
        assert_eq!(clamp_reading(15.0, 0.0, Some(14.0)), 14.0);
        assert_eq!(clamp_reading(-1.0, 0.0, Some(14.0)), 0.0);
        assert_eq!(clamp_reading(7.4, 0.0, Some(14.0)), 7.4);
        assert_eq!(clamp_reading(-5.0, 0.0, None), 0.0);
        assert_eq!(clamp_reading(1e9, 0.0, None), 1e9);
    }

    #[test]
    fn test_clamp_reading_non_finite() {
        assert_eq!(clamp_reading(f64::NAN, 0.0, Some(14.0)), 0.0);
        assert_eq!(clamp_reading(f64::INFINITY, 0.0, Some(14.0)), 14.0);
        assert_eq!(clamp_reading(f64::NEG_INFINITY, 0.0, Some(14.0)), 0.0);
        assert_eq!(clamp_reading(f64::INFINITY, 0.0, None), 0.0);
    }

    #[test]
    fn test_shortfall() {
        assert_eq!(shortfall(60.0, 100.0), 40.0);
        assert_eq!(shortfall(120.0, 100.0), 0.0);
    }

    #[test]
    fn test_distance_outside() {
        assert!((distance_outside(7.0, 7.2, 7.6) - 0.2).abs() < 1e-9);
        assert!((distance_outside(8.2, 7.2, 7.6) - 0.6).abs() < 1e-9);
        assert_eq!(distance_outside(7.4, 7.2, 7.6), 0.0);
    }

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount(299.5), 300);
        assert_eq!(round_amount(299.4), 299);
        assert_eq!(round_amount(-3.0), 0);
        assert_eq!(round_amount(f64::NAN), 0);
        assert_eq!(round_amount(1e12), u32::MAX);
    }
}
