use geo::Coord;

/// Angle at `b` between the directions towards `a` and `c`, in degrees within [0, 180].
pub(crate) fn turning_angle(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    let towards_a = (a.y - b.y).atan2(a.x - b.x);
    let towards_c = (c.y - b.y).atan2(c.x - b.x);
    let degrees = (towards_a - towards_c).to_degrees().abs();
    if degrees > 180.0 { 360.0 - degrees } else { degrees }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    #[test]
    fn straight_line_is_180() {
        assert!((turning_angle(c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn right_angle_is_90_either_way() {
        assert!((turning_angle(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((turning_angle(c(0.0, 1.0), c(0.0, 0.0), c(1.0, 0.0)) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn reflex_difference_is_folded() {
        // atan2 gives 170 and -170 degrees; the angle between them is 20.
        let a = c((170.0_f64).to_radians().cos(), (170.0_f64).to_radians().sin());
        let b = c((-170.0_f64).to_radians().cos(), (-170.0_f64).to_radians().sin());
        assert!((turning_angle(a, c(0.0, 0.0), b) - 20.0).abs() < 1e-9);
    }
}
