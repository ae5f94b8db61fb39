use crate::types::Coordinates;

/// Half-width of the lat/lon box, in degrees.
pub const DEFAULT_TOLERANCE_DEG: f64 = 5.0;

/// Bounding-box proximity check. The box edges are inclusive.
///
/// This is not a visibility computation: altitude, horizon angle and the
/// antimeridian are all ignored.
pub fn is_overhead(satellite: Coordinates, observer: Coordinates, tolerance_deg: f64) -> bool {
    (satellite.latitude - observer.latitude).abs() <= tolerance_deg
        && (satellite.longitude - observer.longitude).abs() <= tolerance_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinates = Coordinates::new(51.51, -0.13);

    #[test]
    fn same_point_is_overhead() {
        assert!(is_overhead(LONDON, LONDON, DEFAULT_TOLERANCE_DEG));
    }

    #[test]
    fn far_point_is_not_overhead() {
        let sat = Coordinates::new(10.0, 10.0);
        assert!(!is_overhead(sat, LONDON, DEFAULT_TOLERANCE_DEG));
    }

    #[test]
    fn exact_tolerance_is_inclusive() {
        let observer = Coordinates::new(10.0, 20.0);
        assert!(is_overhead(Coordinates::new(15.0, 20.0), observer, 5.0));
        assert!(is_overhead(Coordinates::new(5.0, 25.0), observer, 5.0));
        assert!(is_overhead(Coordinates::new(15.0, 15.0), observer, 5.0));
    }

    #[test]
    fn just_past_tolerance_is_excluded() {
        let observer = Coordinates::new(10.0, 20.0);
        assert!(!is_overhead(Coordinates::new(15.25, 20.0), observer, 5.0));
        assert!(!is_overhead(Coordinates::new(10.0, 14.75), observer, 5.0));
    }

    #[test]
    fn both_axes_must_match() {
        let observer = Coordinates::new(0.0, 0.0);
        assert!(!is_overhead(Coordinates::new(1.0, 6.0), observer, 5.0));
        assert!(!is_overhead(Coordinates::new(-6.0, 1.0), observer, 5.0));
    }

    #[test]
    fn grid_around_observer_matches_box() {
        let observer = Coordinates::new(-33.0, 151.0);
        for dlat in -8i32..=8 {
            for dlon in -8i32..=8 {
                let sat = Coordinates::new(-33.0 + dlat as f64, 151.0 + dlon as f64);
                let expected = dlat.abs() <= 5 && dlon.abs() <= 5;
                assert_eq!(
                    is_overhead(sat, observer, DEFAULT_TOLERANCE_DEG),
                    expected,
                    "dlat={dlat} dlon={dlon}"
                );
            }
        }
    }

    #[test]
    fn no_antimeridian_wrap() {
        let observer = Coordinates::new(0.0, 179.0);
        let sat = Coordinates::new(0.0, -179.0);
        assert!(!is_overhead(sat, observer, DEFAULT_TOLERANCE_DEG));
    }
}
