//! Rounding and Percentage Utilities
//!
//! Presentation-boundary helpers. Engine accumulation never rounds; these are
//! applied only when a value is filtered against a display threshold or shown.

/// Round half away from zero to `places` decimals
///
/// Non-finite input returns 0.0.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Whole-number share of `part` in `whole`, 0 when `whole` is not positive
pub fn percent_of(part: f64, whole: f64) -> u32 {
    if !(whole > 0.0) || !part.is_finite() {
        return 0;
    }
    (part / whole * 100.0).round().max(0.0) as u32
}

/// Share of `value` against `reference`, saturating at 100
///
/// `value` is clamped into `[0, reference]` first, so a footprint above the
/// reference fills the bar instead of overflowing it.
pub fn capped_percent(value: f64, reference: f64) -> u32 {
    if !(reference > 0.0) {
        return 0;
    }
    let clamped = if value.is_finite() { value.clamp(0.0, reference) } else { 0.0 };
    ((clamped / reference) * 100.0).round().min(100.0) as u32
}

/// Clamp a contribution to a finite non-negative number
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_to() {
        assert_relative_eq!(round_to(0.1254, 3), 0.125, epsilon = 1e-12);
        assert_relative_eq!(round_to(0.0016, 3), 0.002, epsilon = 1e-12);
        assert_relative_eq!(round_to(2.345_678, 2), 2.35, epsilon = 1e-12);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(0.5, 2.0), 25);
        assert_eq!(percent_of(1.0, 0.0), 0);
        assert_eq!(percent_of(0.333, 1.0), 33);
    }

    #[test]
    fn test_capped_percent() {
        assert_eq!(capped_percent(1.0, 2.0), 50);
        assert_eq!(capped_percent(5.0, 2.0), 100);
        assert_eq!(capped_percent(-1.0, 2.0), 0);
        assert_eq!(capped_percent(1.0, 0.0), 0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-0.2), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
        assert_eq!(non_negative(0.3), 0.3);
    }
}
