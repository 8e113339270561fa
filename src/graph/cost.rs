use geo::Line;
use tracing::debug;

use crate::config::{CostTable, PathType};
use crate::error::{PlanError, Result};
use crate::geom::segment_length;
use crate::graph::{CandidateEdge, SegmentGraph};

/// A candidate segment with its identifier and cost.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEdge {
    pub id: String,
    pub path_type: PathType,
    pub geometry: Line<f64>,
    pub cost: f64,
}

impl CostEdge {
    #[inline] pub fn length(&self) -> f64 { segment_length(&self.geometry) }
}

/// Price every candidate segment at `rate(path_type) × length` and name it
/// `candidate{n}` in edge order. Fails on the first path type missing from
/// `costs`.
pub fn annotate_costs(graph: &SegmentGraph<CandidateEdge>, costs: &CostTable) -> Result<SegmentGraph<CostEdge>> {
    let annotated = graph.try_map_segments(|index, edge| {
        let rate = costs.cost_per_meter(edge.path_type)?;
        Ok::<_, PlanError>(CostEdge {
            id: format!("candidate{index}"),
            path_type: edge.path_type,
            geometry: edge.geometry,
            cost: rate * segment_length(&edge.geometry),
        })
    })?;
    debug!(edges = annotated.edge_count(), "annotated candidate costs");
    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;
    use geo::{LineString, Point};

    use crate::graph::build_candidate_graph;

    fn sample_graph() -> SegmentGraph<CandidateEdge> {
        let facilities = [Point::new(0.0, 10.0), Point::new(20.0, 10.0)];
        let roads = [LineString::from(vec![(0.0, 0.0), (20.0, 0.0)])];
        build_candidate_graph(&facilities, &roads, 50.0)
    }

    #[test]
    fn every_edge_gets_a_positive_cost_and_unique_id() {
        let graph = annotate_costs(&sample_graph(), &CostTable::new(3.0, 1.0)).unwrap();
        let ids = graph.segments().map(|(_, _, edge)| edge.id.as_str()).collect::<AHashSet<_>>();
        assert_eq!(ids.len(), graph.edge_count());
        assert!(graph.segments().all(|(_, _, edge)| edge.cost > 0.0));
    }

    #[test]
    fn facility_link_along_a_road_is_priced_on_road() {
        let facilities = [Point::new(2.0, 0.0), Point::new(8.0, 0.0)];
        let roads = [LineString::from(vec![(0.0, 0.0), (10.0, 0.0)])];
        let graph = build_candidate_graph(&facilities, &roads, 50.0);
        let graph = annotate_costs(&graph, &CostTable::new(10.0, 1.0)).unwrap();
        let link = graph.segment((2.0, 0.0).into(), (8.0, 0.0).into()).unwrap();
        assert_eq!(link.id, "candidate0");
        assert_eq!(link.path_type, PathType::OnRoad);
        assert_eq!(link.cost, 6.0);
    }

    #[test]
    fn cost_is_rate_times_length() {
        let graph = annotate_costs(&sample_graph(), &CostTable::new(3.0, 1.0)).unwrap();
        let direct = graph.segment((0.0, 10.0).into(), (20.0, 10.0).into()).unwrap();
        assert_eq!(direct.id, "candidate0");
        assert_eq!(direct.cost, 60.0);
        let road = graph.segment((0.0, 0.0).into(), (20.0, 0.0).into()).unwrap();
        assert_eq!(road.path_type, PathType::OnRoad);
        assert_eq!(road.cost, 20.0);
    }

    #[test]
    fn missing_rate_is_fatal() {
        let costs = CostTable { off_road: Some(3.0), on_road: None };
        let err = annotate_costs(&sample_graph(), &costs).unwrap_err();
        assert!(matches!(err, PlanError::MissingPathCost(PathType::OnRoad)));
    }
}
