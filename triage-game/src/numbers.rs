//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Ratio of `part` to `whole` in `[0.0, 1.0]`; an empty whole yields 0.
#[must_use]
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let part = cast::<usize, f64>(part.min(whole)).unwrap_or(0.0);
    let whole = cast::<usize, f64>(whole).unwrap_or(1.0);
    part / whole
}

/// Scale an integer by a factor, rounding to the nearest whole number.
#[must_use]
pub fn scale_i32(value: i32, factor: f64) -> i32 {
    round_f64_to_i32(f64::from(value) * factor)
}
