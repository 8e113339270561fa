use ahash::AHashMap;
use geo::Coord;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;

/// Hashable identity of a coordinate. Negative zero is folded into zero.
#[inline]
fn coord_key(coord: Coord<f64>) -> (u64, u64) {
    ((coord.x + 0.0).to_bits(), (coord.y + 0.0).to_bits())
}

/// An undirected graph of straight segments whose nodes are their endpoint
/// coordinates. At most one edge joins any pair of coordinates.
///
/// Edges iterate in insertion order, which downstream identifiers rely on.
#[derive(Debug, Clone)]
pub struct SegmentGraph<E> {
    graph: UnGraph<Coord<f64>, E>,
    nodes: AHashMap<(u64, u64), NodeIndex>,
}

impl<E> Default for SegmentGraph<E> {
    fn default() -> Self {
        Self { graph: UnGraph::default(), nodes: AHashMap::new() }
    }
}

impl<E> SegmentGraph<E> {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn node_count(&self) -> usize { self.graph.node_count() }

    #[inline] pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    #[inline] pub fn is_empty(&self) -> bool { self.graph.node_count() == 0 }

    /// Node at `coord`, if any segment or facility placed one there.
    #[inline]
    pub fn node(&self, coord: Coord<f64>) -> Option<NodeIndex> {
        self.nodes.get(&coord_key(coord)).copied()
    }

    #[inline] pub fn contains(&self, coord: Coord<f64>) -> bool { self.node(coord).is_some() }

    #[inline] pub fn coord(&self, node: NodeIndex) -> Coord<f64> { self.graph[node] }

    /// Every node coordinate, in insertion order.
    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.graph.node_indices().map(|node| self.graph[node])
    }

    /// Node at `coord`, created if missing.
    pub fn ensure_node(&mut self, coord: Coord<f64>) -> NodeIndex {
        let graph = &mut self.graph;
        *self.nodes.entry(coord_key(coord)).or_insert_with(|| graph.add_node(coord))
    }

    /// Join `a` and `b`. Returns `None` for a zero-length segment. When the
    /// two coordinates are already joined the edge takes the new weight but
    /// keeps its place in edge order.
    pub fn add_segment(&mut self, a: Coord<f64>, b: Coord<f64>, weight: E) -> Option<EdgeIndex> {
        if coord_key(a) == coord_key(b) { return None }
        let (na, nb) = (self.ensure_node(a), self.ensure_node(b));
        Some(self.graph.update_edge(na, nb, weight))
    }

    /// Weight of the segment joining `a` and `b`.
    pub fn segment(&self, a: Coord<f64>, b: Coord<f64>) -> Option<&E> {
        let edge = self.graph.find_edge(self.node(a)?, self.node(b)?)?;
        self.graph.edge_weight(edge)
    }

    /// Every segment as `(start, end, weight)`, in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = (Coord<f64>, Coord<f64>, &E)> + '_ {
        self.graph.edge_references()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()], edge.weight()))
    }

    /// Coordinates adjacent to `coord` in the order their segments were
    /// inserted, or `None` when `coord` is not a node.
    pub fn neighbors(&self, coord: Coord<f64>) -> Option<SmallVec<[Coord<f64>; 4]>> {
        let node = self.node(coord)?;
        let mut adjacent = self.graph.edges(node)
            .map(|edge| (edge.id(), if edge.source() == node { edge.target() } else { edge.source() }))
            .collect::<SmallVec<[_; 4]>>();
        adjacent.sort_by_key(|&(edge, _)| edge);
        Some(adjacent.into_iter().map(|(_, other)| self.graph[other]).collect())
    }

    /// Rebuild the graph with new edge weights, keeping node and edge order.
    pub fn try_map_segments<T, Err>(
        &self,
        mut f: impl FnMut(usize, &E) -> Result<T, Err>,
    ) -> Result<SegmentGraph<T>, Err> {
        let mut graph = UnGraph::with_capacity(self.graph.node_count(), self.graph.edge_count());
        for node in self.graph.node_indices() {
            graph.add_node(self.graph[node]);
        }
        for edge in self.graph.edge_references() {
            graph.add_edge(edge.source(), edge.target(), f(edge.id().index(), edge.weight())?);
        }
        Ok(SegmentGraph { graph, nodes: self.nodes.clone() })
    }

    #[inline] pub(crate) fn inner(&self) -> &UnGraph<Coord<f64>, E> { &self.graph }
}
