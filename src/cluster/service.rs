use std::cmp::Reverse;

use geo::{Centroid, Polygon};
use tracing::{debug, warn};

use crate::geom::{disjoint_polygons, BufferZones};
use crate::model::Sited;

/// Overlay pieces smaller than this fraction of `max_distance²` are treated as slivers.
const SLIVER_RATIO: f64 = 1e-9;

/// A disjoint piece of the buffer arrangement and the entities it serves.
#[derive(Debug, Clone)]
pub struct ServicePolygon {
    pub polygon: Polygon<f64>,
    /// Indices of every entity whose buffer contains the polygon's centroid.
    pub candidates: Vec<usize>,
    /// Indices of the candidates this polygon won in greedy assignment.
    pub connections: Vec<usize>,
}

impl ServicePolygon {
    #[inline] pub fn connection_count(&self) -> usize { self.connections.len() }
}

/// Group entities that can share one facility within `max_distance`.
///
/// Every entity is buffered by `max_distance` and the buffers are split into
/// disjoint faces. Faces claim their candidates greedily, largest candidate
/// set first, each entity going to the first face that reaches it. Faces
/// with several connections come first, then single-connection faces; faces
/// left with none are omitted. Entities reached by no face are dropped with
/// a warning.
pub fn split_into_service_groups<T: Sited>(entities: &[T], max_distance: f64) -> Vec<ServicePolygon> {
    let geometries = entities.iter().map(Sited::geometry).collect::<Vec<_>>();
    let zones = BufferZones::new(&geometries, max_distance);

    let min_area = SLIVER_RATIO * max_distance * max_distance;
    let mut polygons = disjoint_polygons(zones.shapes(), min_area).into_iter()
        .filter_map(|polygon| {
            let centroid = polygon.centroid()?;
            Some(ServicePolygon { candidates: zones.containing(&centroid), polygon, connections: Vec::new() })
        })
        .collect::<Vec<_>>();

    // Stable: equal candidate counts keep overlay order.
    polygons.sort_by_key(|polygon| Reverse(polygon.candidates.len()));

    let mut claimed = vec![false; entities.len()];
    let mut social = Vec::new();
    let mut lonely = Vec::new();

    for mut polygon in polygons {
        for &i in &polygon.candidates {
            if claimed[i] { continue }
            claimed[i] = true;
            polygon.connections.push(i);
        }
        match polygon.connection_count() {
            0 => {}
            1 => lonely.push(polygon),
            _ => social.push(polygon),
        }
    }

    let orphans = claimed.iter().enumerate()
        .filter(|&(_, &taken)| !taken)
        .map(|(i, _)| entities[i].id())
        .collect::<Vec<_>>();
    if !orphans.is_empty() {
        warn!(count = orphans.len(), ids = ?orphans, "entities left without a service group");
    }

    debug!(entities = entities.len(), multi = social.len(), single = lonely.len(), "split into service groups");

    social.extend(lonely);
    social
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;
    use proptest::prelude::*;

    use crate::model::Customer;

    fn customers(points: &[(f64, f64)]) -> Vec<Customer> {
        points.iter().enumerate()
            .map(|(i, &(x, y))| Customer::new(format!("c{i}"), Point::new(x, y), 1.0))
            .collect()
    }

    #[test]
    fn triangle_within_range_forms_one_group() {
        let groups = split_into_service_groups(&customers(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.66)]), 20.0);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].connections, vec![0, 1, 2]);
    }

    #[test]
    fn distant_customers_form_singletons() {
        let groups = split_into_service_groups(&customers(&[(0.0, 0.0), (100.0, 0.0)]), 10.0);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.connection_count() == 1));
    }

    #[test]
    fn multi_member_groups_come_first() {
        // A close pair and a far single.
        let groups = split_into_service_groups(&customers(&[(500.0, 0.0), (0.0, 0.0), (5.0, 0.0)]), 10.0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].connections, vec![1, 2]);
        assert_eq!(groups[1].connections, vec![0]);
    }

    #[test]
    fn chain_is_claimed_by_the_densest_overlap_first() {
        // Neighbouring buffers overlap pairwise; no face is shared by three.
        let groups = split_into_service_groups(
            &customers(&[(0.0, 0.0), (15.0, 0.0), (30.0, 0.0), (45.0, 0.0), (60.0, 0.0)]),
            10.0,
        );
        assert_eq!(groups[0].connections.len(), 2);
        let total: usize = groups.iter().map(ServicePolygon::connection_count).sum();
        assert_eq!(total, 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn connections_never_repeat_an_entity(
            points in prop::collection::vec((0.0..200.0f64, 0.0..200.0f64), 1..7),
        ) {
            let groups = split_into_service_groups(&customers(&points), 25.0);
            let mut seen = vec![false; points.len()];
            for group in &groups {
                prop_assert!(group.connection_count() > 0);
                for &i in &group.connections {
                    prop_assert!(group.candidates.contains(&i));
                    prop_assert!(!seen[i], "entity {} assigned twice", i);
                    seen[i] = true;
                }
            }
        }
    }
}
