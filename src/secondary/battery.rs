use geo::Geometry;
use tracing::info;

use crate::cluster::split_into_service_groups;
use crate::error::Result;
use crate::model::{Battery, Customer, Pole};
use crate::place::place_representative_point;

/// Daily demand of every customer hanging off `poles`.
pub fn estimate_demand_kwh_per_day<'a>(poles: impl IntoIterator<Item = &'a Pole>, customers: &[Customer]) -> f64 {
    poles.into_iter()
        .flat_map(|pole| pole.connected_customers.iter())
        .map(|&i| customers[i].demand_kwh_per_day)
        .sum()
}

/// One battery per service group of drop poles within `max_distance`,
/// named `battery{n}`, sized to the demand of the customers behind its poles.
pub fn place_batteries(drop_poles: &[Pole], customers: &[Customer], max_distance: f64) -> Result<Vec<Battery>> {
    let groups = split_into_service_groups(drop_poles, max_distance);

    let mut batteries = Vec::with_capacity(groups.len());
    for (index, group) in groups.into_iter().enumerate() {
        let geometries = group.connections.iter().map(|&i| Geometry::from(drop_poles[i].point)).collect::<Vec<_>>();
        let mut battery = Battery::new(format!("battery{index}"), place_representative_point(&geometries)?);
        battery.demand_kwh_per_day = estimate_demand_kwh_per_day(group.connections.iter().map(|&i| &drop_poles[i]), customers);
        battery.drop_poles = group.connections;
        batteries.push(battery);
    }

    info!(poles = drop_poles.len(), batteries = batteries.len(), "placed batteries");
    Ok(batteries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    fn pole_with(id: &str, x: f64, customers: Vec<usize>) -> Pole {
        let mut pole = Pole::new(id, Point::new(x, 0.0));
        pole.connected_customers = customers;
        pole
    }

    #[test]
    fn demand_sums_through_poles() {
        let customers = vec![
            Customer::new("a", Point::new(0.0, 1.0), 20.0),
            Customer::new("b", Point::new(0.0, 2.0), 12.5),
            Customer::new("c", Point::new(0.0, 3.0), 17.5),
        ];
        let poles = [pole_with("p0", 0.0, vec![0, 2]), pole_with("p1", 5.0, vec![1])];
        assert_eq!(estimate_demand_kwh_per_day(&poles, &customers), 50.0);
    }

    #[test]
    fn distant_pole_groups_get_their_own_battery() {
        let customers = vec![
            Customer::new("a", Point::new(0.0, 1.0), 2.0),
            Customer::new("b", Point::new(10.0, 1.0), 3.0),
            Customer::new("c", Point::new(1000.0, 1.0), 4.0),
        ];
        let poles = [
            pole_with("p0", 0.0, vec![0]),
            pole_with("p1", 10.0, vec![1]),
            pole_with("p2", 1000.0, vec![2]),
        ];
        let batteries = place_batteries(&poles, &customers, 50.0).unwrap();

        assert_eq!(batteries.len(), 2);
        assert_eq!(batteries[0].id, "battery0");
        assert_eq!(batteries[0].drop_poles, vec![0, 1]);
        assert_eq!(batteries[0].demand_kwh_per_day, 5.0);
        assert!(batteries[0].point.x() > -1e-6 && batteries[0].point.x() < 10.0 + 1e-6);
        assert_eq!(batteries[1].drop_poles, vec![2]);
        assert_eq!(batteries[1].demand_kwh_per_day, 4.0);
        assert_eq!(batteries[1].point, Point::new(1000.0, 0.0));
    }
}
