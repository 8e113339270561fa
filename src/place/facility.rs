use rand::Rng;
use tracing::info;

use crate::cluster::{cluster_by_centroid, split_into_service_groups, ServicePolygon};
use crate::error::{PlanError, Result};
use crate::geom::distance_to;
use crate::model::{Customer, Pole};
use crate::place::place_representative_point;

/// Number of facilities needed to serve a service polygon at `max_per_facility`
/// connections each. Never less than one; a zero capacity is a configuration error.
pub fn estimate_group_count(polygon: &ServicePolygon, max_per_facility: usize) -> Result<usize> {
    if max_per_facility == 0 {
        return Err(PlanError::Config("facility capacity must be at least 1".into()));
    }
    let connections = polygon.connection_count();
    if connections == 0 { return Ok(1) }
    Ok(connections.div_ceil(max_per_facility))
}

/// Place one drop pole per service group of customers.
///
/// Oversized groups are split with k-means into `estimate_group_count`
/// clusters. Poles are named `drop{n}` in placement order, and every
/// connected customer is back-linked with its pole id and drop-line length.
pub fn place_drop_poles(
    customers: &mut [Customer],
    max_distance: f64,
    max_count_per_pole: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Pole>> {
    let polygons = split_into_service_groups(customers, max_distance);

    let mut memberships: Vec<Vec<usize>> = Vec::with_capacity(polygons.len());
    for polygon in &polygons {
        let pole_count = estimate_group_count(polygon, max_count_per_pole)?;
        if pole_count > 1 {
            let members = polygon.connections.iter().map(|&i| &customers[i]).collect::<Vec<_>>();
            for cluster in cluster_by_centroid(&members, pole_count, rng)? {
                memberships.push(cluster.into_iter().map(|j| polygon.connections[j]).collect());
            }
        } else {
            memberships.push(polygon.connections.clone());
        }
    }

    let mut poles = Vec::with_capacity(memberships.len());
    for (index, members) in memberships.into_iter().enumerate() {
        let geometries = members.iter().map(|&i| customers[i].geometry.clone()).collect::<Vec<_>>();
        let mut pole = Pole::new(format!("drop{index}"), place_representative_point(&geometries)?);

        for &i in &members {
            let customer = &mut customers[i];
            customer.pole_id = Some(pole.id.clone());
            customer.drop_line_length_m = Some(distance_to(&pole.point, &customer.geometry));
        }
        pole.connected_customers = members;
        poles.push(pole);
    }

    info!(customers = customers.len(), groups = polygons.len(), poles = poles.len(), "placed drop poles");
    Ok(poles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Point, Polygon};
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    fn polygon_with(connections: usize) -> ServicePolygon {
        ServicePolygon {
            polygon: Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]), vec![]),
            candidates: (0..connections).collect(),
            connections: (0..connections).collect(),
        }
    }

    #[rstest]
    #[case(0, 10, 1)]
    #[case(3, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 8, 4)]
    fn group_count_is_ceiling_of_capacity(#[case] connections: usize, #[case] capacity: usize, #[case] expected: usize) {
        assert_eq!(estimate_group_count(&polygon_with(connections), capacity).unwrap(), expected);
    }

    #[test]
    fn zero_capacity_is_a_config_error() {
        assert!(matches!(estimate_group_count(&polygon_with(3), 0), Err(PlanError::Config(_))));
        assert!(matches!(estimate_group_count(&polygon_with(0), 0), Err(PlanError::Config(_))));
    }

    #[test]
    fn triangle_gets_one_pole_near_its_median() {
        let mut customers = vec![
            Customer::new("a", Point::new(0.0, 0.0), 1.0),
            Customer::new("b", Point::new(10.0, 0.0), 1.0),
            Customer::new("c", Point::new(5.0, 8.66), 1.0),
        ];
        let poles = place_drop_poles(&mut customers, 20.0, 10, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(poles.len(), 1);
        assert_eq!(poles[0].id, "drop0");
        assert_eq!(poles[0].connected_customers, vec![0, 1, 2]);
        assert!((poles[0].point.x() - 5.0).abs() < 0.01);
        assert!((poles[0].point.y() - 2.89).abs() < 0.01);

        for customer in &customers {
            assert_eq!(customer.pole_id.as_deref(), Some("drop0"));
            let length = customer.drop_line_length_m.unwrap();
            assert!((length - 5.77).abs() < 0.02, "{} has drop line {length}", customer.id);
        }
    }

    #[test]
    fn oversized_group_is_split_by_capacity() {
        let mut customers = (0..6)
            .map(|i| Customer::new(format!("c{i}"), Point::new(i as f64, 0.0), 1.0))
            .collect::<Vec<_>>();
        let poles = place_drop_poles(&mut customers, 30.0, 2, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(poles.len(), 3);
        let served: usize = poles.iter().map(Pole::customer_count).sum();
        assert_eq!(served, 6);
        assert!(customers.iter().all(|c| c.pole_id.is_some()));
    }
}
