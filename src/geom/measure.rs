use geo::line_measures::Distance;
use geo::{Centroid, Closest, ClosestPoint, Coord, Euclidean, Geometry, Point};

/// Closest coordinate of `geometry` to `point`; `point` itself when it lies
/// on or inside the geometry.
pub(crate) fn closest_coord(point: &Point<f64>, geometry: &Geometry<f64>) -> Option<Coord<f64>> {
    match geometry.closest_point(point) {
        Closest::Intersection(_) => Some(point.0),
        Closest::SinglePoint(p) => Some(p.0),
        Closest::Indeterminate => geometry.centroid().map(|p| p.0),
    }
}

/// Euclidean distance from `point` to `geometry`; zero inside areal geometries.
pub(crate) fn distance_to(point: &Point<f64>, geometry: &Geometry<f64>) -> f64 {
    closest_coord(point, geometry)
        .map(|c| Euclidean.distance(point, &Point::from(c)))
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    #[test]
    fn distance_to_points_lines_and_areas() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(distance_to(&origin, &Geometry::Point(Point::new(3.0, 4.0))), 5.0);

        let line = LineString::from(vec![(-10.0, 2.0), (10.0, 2.0)]);
        assert!((distance_to(&origin, &Geometry::LineString(line)) - 2.0).abs() < 1e-12);

        let square = Polygon::new(
            LineString::from(vec![(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]),
            vec![],
        );
        assert_eq!(distance_to(&origin, &Geometry::Polygon(square.clone())), 0.0);
        assert!((distance_to(&Point::new(4.0, 0.0), &Geometry::Polygon(square)) - 3.0).abs() < 1e-12);
    }
}
