//! Measurement unit conversion.
//!
//! WordprocessingML stores most lengths in twentieths of a point (twips).

/// Number of twips in one point.
pub const TWIPS_PER_POINT: i64 = 20;

/// Convert twips to whole points.
///
/// Rounds to the nearest point; exact halves round to the even neighbour,
/// so `10` twips is `0` points and `30` twips is `2` points.
///
/// # Example
///
/// ```
/// use undocx::units::twips_to_points;
///
/// assert_eq!(twips_to_points(240), 12);
/// assert_eq!(twips_to_points(0), 0);
/// ```
pub fn twips_to_points(twips: i64) -> i64 {
    let quotient = twips.div_euclid(TWIPS_PER_POINT);
    let remainder = twips.rem_euclid(TWIPS_PER_POINT) * 2;

    if remainder > TWIPS_PER_POINT || (remainder == TWIPS_PER_POINT && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

/// Parse a twips attribute value and convert it to points.
///
/// Returns `None` for values that are not integers (e.g. percentages or `auto`).
pub fn parse_twips(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().map(twips_to_points)
}
