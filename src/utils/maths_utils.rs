use crate::config::ANALYSIS;

/// Percent change from `from` to `to`. None if `from` is not a usable divisor.
#[inline]
pub fn pct_change(from: f64, to: f64) -> Option<f64> {
    if !from.is_finite() || !to.is_finite() || from.abs() <= f64::EPSILON {
        return None;
    }
    Some((to - from) / from * 100.0)
}

/// a / b, skipped when b is (near) zero or the result is not finite.
#[inline]
pub fn safe_ratio(a: f64, b: f64) -> Option<f64> {
    if b.abs() <= ANALYSIS.min_range {
        return None;
    }
    let r = a / b;
    r.is_finite().then_some(r)
}

/// Asset prices are strictly positive. Anything below the floor (or NaN) is lifted to it.
#[inline]
pub fn floor_price(price: f64) -> f64 {
    if price.is_nan() {
        ANALYSIS.min_price
    } else {
        price.max(ANALYSIS.min_price)
    }
}
