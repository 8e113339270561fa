use geo::{BoundingRect, Contains, Geometry, MultiPolygon, Point};
use rstar::{primitives::{GeomWithData, Rectangle}, RTree, AABB};

use crate::geom::buffer;

/// Extent of one zone, tagged with its input index.
type ZoneExtent = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Buffer zones around a list of geometries, indexed for point lookups.
#[derive(Debug, Clone)]
pub(crate) struct BufferZones {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<ZoneExtent>,
}

impl BufferZones {
    /// Buffer every geometry by `distance`, preserving input order.
    pub(crate) fn new(geometries: &[Geometry<f64>], distance: f64) -> Self {
        let shapes = geometries.iter()
            .map(|geometry| buffer(geometry, distance))
            .collect::<Vec<_>>();

        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(i, shape)| {
                        let rect = shape.bounding_rect()?;
                        Some(ZoneExtent::new(Rectangle::from_corners(rect.min().into(), rect.max().into()), i))
                    })
                    .collect()
            ),
            shapes,
        }
    }

    /// Get a reference to the buffered shapes.
    #[inline] pub(crate) fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Indices of every zone containing `point`, in input order.
    pub(crate) fn containing(&self, point: &Point<f64>) -> Vec<usize> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        let mut hits = self.rtree.locate_in_envelope_intersecting(&envelope)
            .map(|extent| extent.data)
            .filter(|&i| self.shapes[i].contains(point))
            .collect::<Vec<_>>();
        hits.sort_unstable();
        hits
    }
}
