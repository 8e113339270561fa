use geo::{Coord, LineString};
use petgraph::algo::astar;
use petgraph::unionfind::UnionFind;
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::graph::{CostEdge, SegmentGraph};
use crate::model::Pole;

/// Least-cost route between two facilities over the cost graph.
#[derive(Debug, Clone, PartialEq)]
pub struct PairEdge {
    /// `{source id}-{target id}`.
    pub id: String,
    /// Facility indices, `source < target`.
    pub source: usize,
    pub target: usize,
    pub cost: f64,
    /// Node coordinates along the route, source first.
    pub path: Vec<Coord<f64>>,
}

impl PairEdge {
    #[inline] pub fn geometry(&self) -> LineString<f64> { LineString::new(self.path.clone()) }
}

/// The distribution backbone: the spanning facility-pair routes and the
/// physical segments they run over.
#[derive(Debug, Clone)]
pub struct Backbone {
    /// Spanning tree routes in acceptance order.
    pub tree: Vec<PairEdge>,
    /// Cost-graph segments lying on some tree route, renamed `line{n}`.
    pub graph: SegmentGraph<CostEdge>,
}

impl Backbone {
    #[inline] pub fn total_cost(&self) -> f64 { self.tree.iter().map(|edge| edge.cost).sum() }
}

/// Route every unordered pair of facilities over `graph`, in `(i, j)` order
/// with `i < j`.
pub fn facility_pair_edges(facilities: &[Pole], graph: &SegmentGraph<CostEdge>) -> Result<Vec<PairEdge>> {
    let unreachable = |a: &Pole, b: &Pole| PlanError::Unreachable { from: a.id.clone(), to: b.id.clone() };

    let mut edges = Vec::with_capacity(facilities.len() * facilities.len().saturating_sub(1) / 2);
    for (i, a) in facilities.iter().enumerate() {
        for (j, b) in facilities.iter().enumerate().skip(i + 1) {
            let (Some(start), Some(goal)) = (graph.node(a.xy()), graph.node(b.xy())) else {
                return Err(unreachable(a, b));
            };
            let (cost, nodes) = astar(graph.inner(), start, |n| n == goal, |e| e.weight().cost, |_| 0.0)
                .ok_or_else(|| unreachable(a, b))?;
            edges.push(PairEdge {
                id: format!("{}-{}", a.id, b.id),
                source: i,
                target: j,
                cost,
                path: nodes.into_iter().map(|n| graph.coord(n)).collect(),
            });
        }
    }
    Ok(edges)
}

/// Kruskal over `edges` spanning `node_count` facilities. Returns indices of
/// the accepted edges; equal costs are taken in input order.
pub fn minimum_spanning_edges(node_count: usize, edges: &[PairEdge]) -> Vec<usize> {
    let mut order = (0..edges.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| edges[a].cost.total_cmp(&edges[b].cost));

    let mut sets = UnionFind::<usize>::new(node_count);
    let mut accepted = Vec::with_capacity(node_count.saturating_sub(1));
    for i in order {
        if accepted.len() + 1 >= node_count { break }
        if sets.union(edges[i].source, edges[i].target) { accepted.push(i) }
    }
    accepted
}

/// Connect all facilities at least total cost over `graph`.
///
/// Fails with [`PlanError::Unreachable`] naming the first pair of facilities
/// with no route between them.
pub fn synthesize_backbone(facilities: &[Pole], graph: &SegmentGraph<CostEdge>) -> Result<Backbone> {
    let pairs = facility_pair_edges(facilities, graph)?;
    let tree = minimum_spanning_edges(facilities.len(), &pairs).into_iter()
        .map(|i| pairs[i].clone())
        .collect::<Vec<_>>();
    debug!(pairs = pairs.len(), tree = tree.len(), "extracted spanning tree");

    let mut backbone = SegmentGraph::new();
    for facility in facilities {
        backbone.ensure_node(facility.xy());
    }
    for edge in &tree {
        for window in edge.path.windows(2) {
            let (a, b) = (window[0], window[1]);
            if backbone.segment(a, b).is_some() { continue }
            let Some(segment) = graph.segment(a, b) else { continue };
            let id = format!("line{}", backbone.edge_count());
            backbone.add_segment(a, b, CostEdge { id, ..segment.clone() });
        }
    }

    let backbone = Backbone { tree, graph: backbone };
    info!(facilities = facilities.len(), segments = backbone.graph.edge_count(), cost = backbone.total_cost(), "synthesized backbone");
    Ok(backbone)
}
