// Decimal rounding with ties-to-even, matching how the published stats are
// rounded (150.5 -> 150, 151.5 -> 152).

/// Round `value` to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    // Scale, round, unscale: values stored just below a decimal half
    // (2.675 is 2.67499...) round down.
    (value * scale).round_ties_even() / scale
}

/// Round to the nearest integer, ties to even.
pub fn round_int(value: f64) -> i64 {
    value.round_ties_even() as i64
}
