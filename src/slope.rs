/// Smallest positive subnormal `f64`. Previous values below this in magnitude
/// are zero for every practical purpose and would blow the division up.
const EPSILON: f64 = f64::from_bits(1);

/// Percentage change from `previous` to `current`.
///
/// ```text
/// slope = (current − previous) / previous × 100
/// ```
///
/// Returns `0.0` when `previous` is (sub-normally close to) zero rather than
/// producing an infinity.
///
/// # Example
///
/// ```
/// use ma_slope::percent_change;
///
/// assert_eq!(percent_change(101.0, 100.0), 1.0);
/// assert_eq!(percent_change(5.0, 0.0), 0.0);
/// ```
#[inline]
#[must_use]
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous.abs() < EPSILON {
        return 0.0;
    }

    (current - previous) / previous * 100.0
}
