#![doc = "Rural electrical distribution network planning"]
mod cluster;
mod config;
mod error;
mod geom;
mod graph;
mod model;
mod place;
mod plan;
mod secondary;

#[doc(inline)]
pub use config::{CostTable, PathType, PlanConfig};

#[doc(inline)]
pub use error::{PlanError, Result};

#[doc(inline)]
pub use model::{Attributes, Battery, Customer, Pole, PoleType, Road, Sited};

#[doc(inline)]
pub use cluster::{cluster_by_centroid, split_into_service_groups, ServicePolygon};

#[doc(inline)]
pub use place::{estimate_group_count, place_drop_poles, place_representative_point};

#[doc(inline)]
pub use graph::{
    annotate_costs, build_candidate_graph, facility_pair_edges, minimum_spanning_edges, synthesize_backbone,
    Backbone, CandidateEdge, CandidateGraphBuilder, CostEdge, PairEdge, SegmentGraph,
};

#[doc(inline)]
pub use secondary::{
    assign_panel_poles, choose_lamp_poles, choose_pole_types, estimate_demand_kwh_per_day,
    interpolated_pole_count, place_batteries, place_distribution_poles, rank_poles_by_backbone_cost,
    required_panel_count, DistributionPoles, LampReport,
};

#[doc(inline)]
pub use plan::{plan_network, DistributionPlan};
