use std::collections::BTreeMap;

use geo::LineString;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::config::PlanConfig;
use crate::error::Result;
use crate::graph::{annotate_costs, build_candidate_graph, synthesize_backbone, Backbone, CostEdge, PairEdge, SegmentGraph};
use crate::model::{Battery, Customer, Pole, PoleType, Road};
use crate::place::place_drop_poles;
use crate::secondary::{
    assign_panel_poles, choose_lamp_poles, choose_pole_types, place_batteries, place_distribution_poles, LampReport,
};

/// Everything a planning run places, ready for an external writer.
#[derive(Debug, Clone)]
pub struct DistributionPlan {
    /// Drop poles first, then distribution poles.
    pub poles: Vec<Pole>,
    drop_pole_count: usize,
    pub batteries: Vec<Battery>,
    pub backbone: Backbone,
    /// The backbone cut at every pole.
    pub spans: SegmentGraph<CostEdge>,
    pub lamps: LampReport,
    /// Pole indices by type, in pole order.
    pub pole_types: BTreeMap<PoleType, Vec<usize>>,
}

impl DistributionPlan {
    #[inline] pub fn drop_poles(&self) -> &[Pole] { &self.poles[..self.drop_pole_count] }

    #[inline] pub fn distribution_poles(&self) -> &[Pole] { &self.poles[self.drop_pole_count..] }

    /// Logical facility-to-facility routes of the spanning tree.
    #[inline] pub fn tree(&self) -> &[PairEdge] { &self.backbone.tree }

    /// Physical backbone lines.
    #[inline] pub fn lines(&self) -> &SegmentGraph<CostEdge> { &self.backbone.graph }

    /// Total backbone line length in meters.
    pub fn line_length(&self) -> f64 {
        self.backbone.graph.segments().map(|(_, _, line)| line.length()).sum()
    }
}

/// Plan a distribution network for `customers` along `roads`.
///
/// Customers are updated in place with their drop pole and drop-line length.
/// Fails on invalid options, a missing cost rate, or facilities that cannot
/// be connected.
pub fn plan_network(customers: &mut [Customer], roads: &[Road], config: &PlanConfig) -> Result<DistributionPlan> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let drop_poles = place_drop_poles(customers, config.max_distance, config.max_count_per_facility, &mut rng)?;

    let facilities = drop_poles.iter().map(|pole| pole.point).collect::<Vec<_>>();
    let road_lines = roads.iter().map(|road| road.geometry.clone()).collect::<Vec<LineString<f64>>>();
    let candidates = build_candidate_graph(&facilities, &road_lines, config.link_max_length);
    let costs = annotate_costs(&candidates, &config.cost_per_meter_by_path_type)?;
    let backbone = synthesize_backbone(&drop_poles, &costs)?;

    let distribution = place_distribution_poles(&backbone.graph, config.pole_max_interval);
    let mut batteries = place_batteries(&drop_poles, customers, config.battery_max_distance)?;

    let drop_pole_count = drop_poles.len();
    let mut poles = drop_poles;
    poles.extend(distribution.poles);

    assign_panel_poles(&mut poles, &mut batteries, &distribution.spans, config.min_count_per_kwh);
    let lamps = choose_lamp_poles(&mut poles, customers, config.lamp_max_distance);
    let pole_types = choose_pole_types(&mut poles, &distribution.spans, config.min_angle_degrees);

    info!(
        customers = customers.len(),
        poles = poles.len(),
        batteries = batteries.len(),
        lines = backbone.graph.edge_count(),
        lamps = lamps.lamp_poles.len(),
        "planned distribution network"
    );

    Ok(DistributionPlan {
        poles,
        drop_pole_count,
        batteries,
        backbone,
        spans: distribution.spans,
        lamps,
        pole_types,
    })
}
