use geo::Centroid;
use rstar::{primitives::GeomWithData, RTree};
use tracing::{info, warn};

use crate::model::{Customer, Pole};

type CustomerSite = GeomWithData<[f64; 2], usize>;

/// Outcome of lamp placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LampReport {
    /// Lamp poles in the order they were chosen.
    pub lamp_poles: Vec<usize>,
    /// Customers farther than the lamp distance from every pole.
    pub uncovered_customers: Vec<usize>,
}

/// Greedy cover of customers by street lamps on poles.
///
/// Each round picks the unchosen pole reaching the most still-unlit
/// customers within `max_distance`, preferring the smaller summed distance
/// and then the earlier pole. Stops once every customer is lit or no pole
/// reaches any unlit customer.
pub fn choose_lamp_poles(poles: &mut [Pole], customers: &[Customer], max_distance: f64) -> LampReport {
    let mut unlit = vec![false; customers.len()];
    let mut sites = Vec::with_capacity(customers.len());
    for (i, customer) in customers.iter().enumerate() {
        match customer.geometry.centroid() {
            Some(c) => {
                unlit[i] = true;
                sites.push(CustomerSite::new([c.x(), c.y()], i));
            }
            None => warn!(customer = %customer.id, "customer without a location cannot be lit"),
        }
    }
    let located = unlit.clone();
    let tree = RTree::bulk_load(sites);
    let max_distance_2 = max_distance * max_distance;

    // Unlit customers within reach of a pole, with their distances.
    let reach = |pole: &Pole, unlit: &[bool]| {
        let (px, py) = (pole.point.x(), pole.point.y());
        tree.locate_within_distance([px, py], max_distance_2)
            .filter(|site| unlit[site.data])
            .map(|site| (site.data, (site.geom()[0] - px).hypot(site.geom()[1] - py)))
            .collect::<Vec<_>>()
    };

    let mut chosen = vec![false; poles.len()];
    let mut report = LampReport::default();
    let mut remaining = unlit.iter().filter(|&&u| u).count();

    while remaining > 0 {
        let mut best: Option<(usize, usize, f64)> = None;
        for (i, pole) in poles.iter().enumerate() {
            if chosen[i] { continue }
            let lit = reach(pole, &unlit);
            let spread = lit.iter().map(|&(_, d)| d).sum::<f64>();
            let better = match best {
                None => true,
                Some((_, count, distance)) => lit.len() > count || (lit.len() == count && spread < distance),
            };
            if better { best = Some((i, lit.len(), spread)) }
        }

        let Some((i, count, _)) = best else { break };
        if count == 0 { break }

        for (c, _) in reach(&poles[i], &unlit) {
            unlit[c] = false;
        }
        remaining -= count;
        chosen[i] = true;
        poles[i].has_lamp = true;
        report.lamp_poles.push(i);
    }

    report.uncovered_customers = (0..customers.len())
        .filter(|&i| unlit[i] || !located[i])
        .collect();
    if !report.uncovered_customers.is_empty() {
        warn!(count = report.uncovered_customers.len(), "customers left without a street lamp");
    }
    info!(lamps = report.lamp_poles.len(), "chose lamp poles");
    report
}
