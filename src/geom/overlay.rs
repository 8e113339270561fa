use geo::{Area, BooleanOps, BoundingRect, Intersects, MultiPolygon, Polygon};

/// Split overlapping shapes into the faces of their planar arrangement.
///
/// Every returned polygon lies inside a fixed subset of the inputs and is
/// disjoint from every other returned polygon. Pieces with area at or below
/// `min_area` are dropped as overlay slivers.
pub(crate) fn disjoint_polygons(overlapping: &[MultiPolygon<f64>], min_area: f64) -> Vec<Polygon<f64>> {
    let mut faces: Vec<MultiPolygon<f64>> = Vec::new();
    let mut coverage = MultiPolygon::new(Vec::new());

    for shape in overlapping {
        let Some(shape_rect) = shape.bounding_rect() else { continue };
        let mut next = Vec::with_capacity(faces.len() * 2 + 1);

        for face in faces {
            // Faces off the shape's bounding box are untouched by this split.
            let overlaps = face.bounding_rect().is_some_and(|rect| rect.intersects(&shape_rect));
            if !overlaps {
                next.push(face);
                continue;
            }
            push_face(&mut next, face.intersection(shape), min_area);
            push_face(&mut next, face.difference(shape), min_area);
        }

        let fresh = if coverage.0.is_empty() { shape.clone() } else { shape.difference(&coverage) };
        push_face(&mut next, fresh, min_area);

        coverage = if coverage.0.is_empty() { shape.clone() } else { coverage.union(shape) };
        faces = next;
    }

    faces.into_iter()
        .flat_map(|face| face.0)
        .filter(|polygon| polygon.unsigned_area() > min_area)
        .collect()
}

fn push_face(faces: &mut Vec<MultiPolygon<f64>>, face: MultiPolygon<f64>, min_area: f64) {
    if face.unsigned_area() > min_area { faces.push(face) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Geometry, Point};

    use crate::geom::buffer;

    fn disks(centers: &[(f64, f64)], radius: f64) -> Vec<MultiPolygon<f64>> {
        centers.iter()
            .map(|&(x, y)| buffer(&Geometry::Point(Point::new(x, y)), radius))
            .collect()
    }

    #[test]
    fn two_overlapping_disks_make_three_faces() {
        let faces = disjoint_polygons(&disks(&[(0.0, 0.0), (10.0, 0.0)], 8.0), 1e-6);
        assert_eq!(faces.len(), 3);

        let lens = faces.iter().filter(|f| f.contains(&Point::new(5.0, 0.0))).count();
        assert_eq!(lens, 1);
    }

    #[test]
    fn separate_disks_stay_whole() {
        let shapes = disks(&[(0.0, 0.0), (100.0, 0.0)], 8.0);
        let faces = disjoint_polygons(&shapes, 1e-6);
        assert_eq!(faces.len(), 2);

        let total: f64 = faces.iter().map(|f| f.unsigned_area()).sum();
        let expected: f64 = shapes.iter().map(|s| s.unsigned_area()).sum();
        assert!((total - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn faces_partition_the_union() {
        let shapes = disks(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.66)], 8.0);
        let faces = disjoint_polygons(&shapes, 1e-6);
        // Three lenses, one triple overlap, three outer crescents.
        assert_eq!(faces.len(), 7);

        let union = shapes.iter().cloned().reduce(|a, b| a.union(&b)).unwrap();
        let total: f64 = faces.iter().map(|f| f.unsigned_area()).sum();
        assert!((total - union.unsigned_area()).abs() < 1e-6 * total);
    }
}
