//! Numeric helpers.

/// Round `x` to `sf` significant figures, ties to even.
///
/// Zero and non-finite values are returned unchanged.
pub fn sigfig(x: f64, sf: i32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let factor = 10f64.powf(x.abs().log10().ceil());
    let scale = 10f64.powi(sf);
    (x / factor * scale).round_ties_even() / scale * factor
}
