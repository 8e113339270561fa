use geo::{Coord, Euclidean, InterpolatePoint, Line, Point};
use tracing::debug;

use crate::geom::segment_length;
use crate::graph::{CostEdge, SegmentGraph};
use crate::model::Pole;

/// Intermediate poles strung along the backbone.
#[derive(Debug, Clone, Default)]
pub struct DistributionPoles {
    /// Poles named `{line id}-{k}`, `k` counting from 1 along each line.
    pub poles: Vec<Pole>,
    /// The backbone cut at every pole. Each span keeps the id and path type
    /// of its line and a share of its cost in proportion to length.
    pub spans: SegmentGraph<CostEdge>,
}

/// Number of intermediate poles on a line of `length` at spacing at most `max_interval`.
#[inline]
pub fn interpolated_pole_count(length: f64, max_interval: f64) -> usize {
    (length / max_interval).floor() as usize
}

/// Place `floor(length / max_interval)` poles on each backbone line, dividing
/// it into equal spans.
pub fn place_distribution_poles(backbone: &SegmentGraph<CostEdge>, max_interval: f64) -> DistributionPoles {
    let mut placed = DistributionPoles::default();
    for coord in backbone.coords() {
        placed.spans.ensure_node(coord);
    }

    for (_, _, line) in backbone.segments() {
        let count = interpolated_pole_count(line.length(), max_interval);
        let mut previous = line.geometry.start;
        for k in 1..=count {
            let fraction = k as f64 / (count + 1) as f64;
            let point = Euclidean.point_at_ratio_between(Point::from(line.geometry.start), Point::from(line.geometry.end), fraction);
            placed.poles.push(Pole::new(format!("{}-{k}", line.id), point));
            add_span(&mut placed.spans, line, previous, point.0);
            previous = point.0;
        }
        add_span(&mut placed.spans, line, previous, line.geometry.end);
    }

    debug!(lines = backbone.edge_count(), poles = placed.poles.len(), "placed distribution poles");
    placed
}

fn add_span(spans: &mut SegmentGraph<CostEdge>, line: &CostEdge, a: Coord<f64>, b: Coord<f64>) {
    let geometry = Line::new(a, b);
    let length = line.length();
    let share = if length > 0.0 { segment_length(&geometry) / length } else { 0.0 };
    spans.add_segment(a, b, CostEdge { geometry, cost: line.cost * share, ..line.clone() });
}
