use std::f64::consts::{FRAC_PI_2, PI};

use geo::{BooleanOps, Coord, Geometry, LineString, MultiPolygon, Polygon};
use geo_buffer::{buffer_multi_polygon_rounded, buffer_polygon_rounded};

/// Arc resolution: vertices per quarter circle.
const QUADRANT_SEGMENTS: usize = 16;

/// Grow a geometry by `distance` in every direction.
///
/// Areal geometries are offset by their straight skeleton with rounded
/// corners. Points and lines get disks and capsules with `QUADRANT_SEGMENTS`
/// vertices per quarter turn, inscribed in the exact buffer.
pub(crate) fn buffer(geometry: &Geometry<f64>, distance: f64) -> MultiPolygon<f64> {
    match geometry {
        Geometry::Point(point) => MultiPolygon::new(vec![disk(point.0, distance)]),
        Geometry::MultiPoint(points) => union_all(
            points.iter().map(|point| MultiPolygon::new(vec![disk(point.0, distance)]))
        ),
        Geometry::Line(line) => MultiPolygon::new(vec![capsule(line.start, line.end, distance)]),
        Geometry::LineString(line) => buffer_line_string(line, distance),
        Geometry::MultiLineString(lines) => union_all(
            lines.iter().map(|line| buffer_line_string(line, distance))
        ),
        Geometry::Polygon(polygon) => buffer_polygon_rounded(polygon, distance),
        Geometry::MultiPolygon(polygons) => buffer_multi_polygon_rounded(polygons, distance),
        Geometry::Rect(rect) => buffer_polygon_rounded(&rect.to_polygon(), distance),
        Geometry::Triangle(triangle) => buffer_polygon_rounded(&triangle.to_polygon(), distance),
        Geometry::GeometryCollection(collection) => union_all(
            collection.iter().map(|geometry| buffer(geometry, distance))
        ),
    }
}

/// Regular polygon approximating a circle, counter-clockwise.
fn disk(center: Coord<f64>, radius: f64) -> Polygon<f64> {
    arc(center, radius, 0.0, 2.0 * PI, 4 * QUADRANT_SEGMENTS)
}

/// Stadium around the segment `a`-`b`: two half disks joined by straight sides.
fn capsule(a: Coord<f64>, b: Coord<f64>, radius: f64) -> Polygon<f64> {
    if a == b { return disk(a, radius) }

    let heading = (b.y - a.y).atan2(b.x - a.x);
    let steps = 2 * QUADRANT_SEGMENTS;

    let mut ring = arc_coords(b, radius, heading - FRAC_PI_2, PI, steps);
    ring.extend(arc_coords(a, radius, heading + FRAC_PI_2, PI, steps));
    Polygon::new(LineString::from(ring), vec![])
}

fn arc(center: Coord<f64>, radius: f64, start: f64, sweep: f64, steps: usize) -> Polygon<f64> {
    let mut ring = arc_coords(center, radius, start, sweep, steps);
    ring.pop(); // full turn: last vertex repeats the first
    Polygon::new(LineString::from(ring), vec![])
}

fn arc_coords(center: Coord<f64>, radius: f64, start: f64, sweep: f64, steps: usize) -> Vec<Coord<f64>> {
    (0..=steps)
        .map(|i| start + sweep * i as f64 / steps as f64)
        .map(|angle| Coord { x: center.x + radius * angle.cos(), y: center.y + radius * angle.sin() })
        .collect()
}

fn buffer_line_string(line: &LineString<f64>, distance: f64) -> MultiPolygon<f64> {
    if line.0.len() < 2 {
        return MultiPolygon::new(line.0.first().map(|&c| disk(c, distance)).into_iter().collect());
    }
    union_all(line.lines().map(|segment| MultiPolygon::new(vec![capsule(segment.start, segment.end, distance)])))
}

fn union_all(shapes: impl IntoIterator<Item = MultiPolygon<f64>>) -> MultiPolygon<f64> {
    shapes.into_iter()
        .reduce(|a, b| a.union(&b))
        .unwrap_or_else(|| MultiPolygon::new(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Contains, Point};

    #[test]
    fn point_buffer_is_inscribed_disk() {
        let shape = buffer(&Geometry::Point(Point::new(3.0, 4.0)), 10.0);
        assert_eq!(shape.0.len(), 1);
        let area = shape.unsigned_area();
        assert!(area < PI * 100.0);
        assert!(area > 0.99 * PI * 100.0);
        assert!(shape.contains(&Point::new(12.0, 4.0)));
        assert!(!shape.contains(&Point::new(13.5, 4.0)));
    }

    #[test]
    fn line_buffer_covers_the_corridor() {
        let line = LineString::from(vec![(0.0, 0.0), (20.0, 0.0), (20.0, 20.0)]);
        let shape = buffer(&Geometry::LineString(line), 2.0);
        assert!(shape.contains(&Point::new(10.0, 1.5)));
        assert!(shape.contains(&Point::new(21.5, 10.0)));
        assert!(!shape.contains(&Point::new(10.0, 10.0)));
    }

    #[test]
    fn polygon_buffer_grows_footprint() {
        let square = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![],
        );
        let shape = buffer(&Geometry::Polygon(square), 1.0);
        assert!(shape.contains(&Point::new(2.0, 2.0)));
        assert!(shape.contains(&Point::new(4.9, 2.0)));
        assert!(!shape.contains(&Point::new(5.5, 2.0)));
        assert!(shape.unsigned_area() > 16.0 + 16.0);
    }

    #[test]
    fn disjoint_polygons_buffer_separately() {
        let square = |x: f64| Polygon::new(
            LineString::from(vec![(x, 0.0), (x + 2.0, 0.0), (x + 2.0, 2.0), (x, 2.0)]),
            vec![],
        );
        let shape = buffer(&Geometry::MultiPolygon(MultiPolygon::new(vec![square(0.0), square(10.0)])), 1.0);
        assert_eq!(shape.0.len(), 2);
        assert!(shape.contains(&Point::new(2.5, 1.0)));
        assert!(shape.contains(&Point::new(9.5, 1.0)));
        assert!(!shape.contains(&Point::new(6.0, 1.0)));
    }
}
