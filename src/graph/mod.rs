mod builder;
mod cost;
mod segments;
mod topology;

pub use builder::{build_candidate_graph, CandidateEdge, CandidateGraphBuilder};
pub use cost::{annotate_costs, CostEdge};
pub use segments::SegmentGraph;
pub use topology::{facility_pair_edges, minimum_spanning_edges, synthesize_backbone, Backbone, PairEdge};
