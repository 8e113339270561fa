use geo::Coord;
use petgraph::algo::dijkstra;
use rstar::{primitives::GeomWithData, RTree};
use tracing::{info, warn};

use crate::graph::{CostEdge, SegmentGraph};
use crate::model::{Battery, Pole};

type PoleSite = GeomWithData<[f64; 2], usize>;

/// Panels needed to cover `demand_kwh_per_day` at `count_per_kwh`.
#[inline]
pub fn required_panel_count(demand_kwh_per_day: f64, count_per_kwh: f64) -> usize {
    (count_per_kwh * demand_kwh_per_day).ceil().max(0.0) as usize
}

/// Poles on the backbone ordered by least backbone cost from `poles[origin]`,
/// then by coordinate. A pole off the backbone ranks only itself.
pub fn rank_poles_by_backbone_cost(poles: &[Pole], origin: usize, backbone: &SegmentGraph<CostEdge>) -> Vec<usize> {
    let Some(start) = backbone.node(poles[origin].xy()) else { return vec![origin] };
    let costs = dijkstra(backbone.inner(), start, None, |e| e.weight().cost);

    let mut ranked = poles.iter().enumerate()
        .filter_map(|(i, pole)| {
            let node = backbone.node(pole.xy())?;
            costs.get(&node).map(|&cost| (cost, pole.xy(), i))
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|(ca, xa, ia), (cb, xb, ib)| {
        ca.total_cmp(cb).then(xa.x.total_cmp(&xb.x)).then(xa.y.total_cmp(&xb.y)).then(ia.cmp(ib))
    });
    ranked.into_iter().map(|(_, _, i)| i).collect()
}

/// Put `required_panel_count` panels on the poles nearest each battery along
/// the backbone. A pole carries at most one panel; when poles run out the
/// battery keeps fewer panels than required. Returns every panel pole.
pub fn assign_panel_poles(
    poles: &mut [Pole],
    batteries: &mut [Battery],
    backbone: &SegmentGraph<CostEdge>,
    count_per_kwh: f64,
) -> Vec<usize> {
    if poles.is_empty() { return Vec::new() }
    let tree = RTree::bulk_load(
        poles.iter().enumerate().map(|(i, pole)| PoleSite::new(xy(pole.xy()), i)).collect(),
    );

    let mut panel_poles = Vec::new();
    for battery in batteries.iter_mut() {
        let required = required_panel_count(battery.demand_kwh_per_day, count_per_kwh);
        let Some(nearest) = tree.nearest_neighbor(&xy(battery.xy())) else { continue };

        battery.panel_poles = rank_poles_by_backbone_cost(poles, nearest.data, backbone).into_iter()
            .filter(|&i| !poles[i].has_panel)
            .take(required)
            .collect();
        for &i in &battery.panel_poles {
            poles[i].has_panel = true;
        }

        if battery.panel_count() < required {
            warn!(battery = %battery.id, required, assigned = battery.panel_count(), "not enough poles for panels");
        }
        panel_poles.extend_from_slice(&battery.panel_poles);
    }

    info!(batteries = batteries.len(), panels = panel_poles.len(), "assigned panel poles");
    panel_poles
}

#[inline]
fn xy(coord: Coord<f64>) -> [f64; 2] { [coord.x, coord.y] }
