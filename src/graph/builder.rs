use geo::{Coord, Line, LineString, Point};
use tracing::debug;

use crate::config::PathType;
use crate::geom::{line_segments, link_segments, nearest_segment, segment_length, tie_in_segments};
use crate::graph::SegmentGraph;

/// A candidate path segment, before costing.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEdge {
    pub path_type: PathType,
    pub geometry: Line<f64>,
}

/// Owns a candidate graph while its passes run.
///
/// Passes must run in order: facility links, road links, then road tie-ins.
/// [`build`](Self::build) hands back the finished graph, which is not
/// mutated afterwards.
#[derive(Debug, Default)]
pub struct CandidateGraphBuilder {
    graph: SegmentGraph<CandidateEdge>,
}

impl CandidateGraphBuilder {
    pub fn new() -> Self { Self::default() }

    fn add(&mut self, a: Coord<f64>, b: Coord<f64>, path_type: PathType) {
        self.graph.add_segment(a, b, CandidateEdge { path_type, geometry: Line::new(a, b) });
    }

    /// Pass 1: a direct off-road link between every pair of facilities.
    pub fn link_facilities(&mut self, facilities: &[Point<f64>]) -> &mut Self {
        for (i, a) in facilities.iter().enumerate() {
            self.graph.ensure_node(a.0);
            for b in &facilities[i + 1..] {
                self.add(a.0, b.0, PathType::OffRoad);
            }
        }
        self
    }

    /// Pass 2: off-road stitches between roads that pass within `max_length`
    /// of each other without touching.
    pub fn link_roads(&mut self, roads: &[LineString<f64>], max_length: f64) -> &mut Self {
        for link in link_segments(roads, max_length) {
            self.add(link.start, link.end, PathType::OffRoad);
        }
        self
    }

    /// Pass 3: tie every facility into its nearest road segment, splitting
    /// that segment at the foot of the tie-in, then lay every road segment
    /// as on-road. Does nothing without road segments.
    pub fn tie_into_roads(&mut self, facilities: &[Point<f64>], roads: &[LineString<f64>]) -> &mut Self {
        let mut segments = line_segments(roads);
        if segments.is_empty() { return self }

        for facility in facilities {
            let Some(nearest) = nearest_segment(facility, &segments) else { continue };
            let (tie_in, start_half, end_half) = tie_in_segments(facility, &segments[nearest]);
            segments.remove(nearest);
            segments.extend([start_half, end_half].into_iter().filter(|half| segment_length(half) > 0.0));
            self.add(tie_in.start, tie_in.end, PathType::OffRoad);
        }

        for segment in segments {
            self.add(segment.start, segment.end, PathType::OnRoad);
        }
        self
    }

    pub fn build(self) -> SegmentGraph<CandidateEdge> {
        debug!(nodes = self.graph.node_count(), edges = self.graph.edge_count(), "built candidate graph");
        self.graph
    }
}

/// Run all three passes over `facilities` and `roads`.
///
/// Without roads the result is the complete graph on the facilities.
pub fn build_candidate_graph(
    facilities: &[Point<f64>],
    roads: &[LineString<f64>],
    link_max_length: f64,
) -> SegmentGraph<CandidateEdge> {
    let mut builder = CandidateGraphBuilder::new();
    builder
        .link_facilities(facilities)
        .link_roads(roads, link_max_length)
        .tie_into_roads(facilities, roads);
    builder.build()
}
