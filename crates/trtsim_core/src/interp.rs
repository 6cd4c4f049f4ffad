//! Linear crossing interpolation shared by first-passage extraction and TRT
//! inference.

/// Time at which the segment `(x0, y0) -> (x1, y1)` reaches `level`.
///
/// The fraction along the segment is clamped to `[0, 1]` so floating-point
/// overshoot never leaves the bracket. A flat segment (`y1 == y0`) has no
/// unique crossing and resolves to the later point `x1`.
#[inline]
pub fn interpolate_crossing(x0: f64, x1: f64, y0: f64, y1: f64, level: f64) -> f64 {
    if y1 == y0 {
        return x1;
    }
    let frac = ((level - y0) / (y1 - y0)).clamp(0.0, 1.0);
    x0 + frac * (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_crossing() {
        assert_eq!(interpolate_crossing(1.0, 2.0, 0.5, 1.5, 1.0), 1.5);
    }

    #[test]
    fn test_flat_segment_takes_later_point() {
        assert_eq!(interpolate_crossing(2.0, 3.0, 0.6, 0.6, 0.6), 3.0);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        // level outside the segment's range
        assert_eq!(interpolate_crossing(0.0, 1.0, 0.0, 1.0, 2.0), 1.0);
        assert_eq!(interpolate_crossing(0.0, 1.0, 0.5, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_crossing_at_upper_endpoint() {
        assert_eq!(interpolate_crossing(4.0, 5.0, 0.2, 0.8, 0.8), 5.0);
    }
}
