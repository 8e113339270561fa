use argmin::core::{CostFunction, Error, Executor, Gradient, State};
use argmin::solver::{linesearch::MoreThuenteLineSearch, quasinewton::LBFGS};
use geo::{Centroid, Geometry, Point};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::geom::{closest_coord, distance_to};

const MAX_ITERATIONS: u64 = 100;
const LBFGS_MEMORY: usize = 7;

const WEISZFELD_ITERATIONS: usize = 500;
const WEISZFELD_TOLERANCE: f64 = 1e-9;

/// Terms closer than this contribute no direction (the distance is not differentiable there).
const SINGULAR_DISTANCE: f64 = 1e-12;

/// Sum of Euclidean distances from a candidate point to a set of geometries.
struct DistanceSum<'a> {
    geometries: &'a [Geometry<f64>],
}

impl DistanceSum<'_> {
    fn total(&self, xy: &[f64]) -> f64 {
        let point = Point::new(xy[0], xy[1]);
        self.geometries.iter().map(|g| distance_to(&point, g)).sum()
    }
}

impl CostFunction for DistanceSum<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, xy: &Self::Param) -> std::result::Result<Self::Output, Error> {
        Ok(self.total(xy))
    }
}

impl Gradient for DistanceSum<'_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    /// Sum of unit vectors pointing away from each geometry's closest point.
    fn gradient(&self, xy: &Self::Param) -> std::result::Result<Self::Gradient, Error> {
        let point = Point::new(xy[0], xy[1]);
        let mut grad = vec![0.0; 2];
        for c in self.geometries.iter().filter_map(|g| closest_coord(&point, g)) {
            let (dx, dy) = (xy[0] - c.x, xy[1] - c.y);
            let d = dx.hypot(dy);
            if d < SINGULAR_DISTANCE { continue }
            grad[0] += dx / d;
            grad[1] += dy / d;
        }
        Ok(grad)
    }
}

/// Find the point minimizing the total distance to `geometries`.
///
/// L-BFGS seeded at the centroid of the first geometry. If the line search
/// gives up, Weiszfeld iterations from the seed are used instead. The result
/// is never worse than the seed, but it is only a local optimum.
pub fn place_representative_point(geometries: &[Geometry<f64>]) -> Result<Point<f64>> {
    let seed = geometries.first()
        .and_then(|g| g.centroid())
        .ok_or(PlanError::EmptyGroup)?;
    let seed = vec![seed.x(), seed.y()];

    let problem = DistanceSum { geometries };
    let seed_cost = problem.total(&seed);

    let solver = LBFGS::new(MoreThuenteLineSearch::new(), LBFGS_MEMORY);
    let executor = Executor::new(DistanceSum { geometries }, solver)
        .configure(|state| state.param(seed.clone()).max_iters(MAX_ITERATIONS));

    let optimized = match executor.run() {
        Ok(result) => result.state().get_best_param().cloned(),
        Err(err) => {
            debug!(%err, "L-BFGS stopped, falling back to Weiszfeld iterations");
            None
        }
    }
    .unwrap_or_else(|| weiszfeld(&problem, &seed));

    let best = if problem.total(&optimized) <= seed_cost { optimized } else { seed };
    Ok(Point::new(best[0], best[1]))
}

/// Fixed-point iteration for the geometric median over closest points.
fn weiszfeld(problem: &DistanceSum<'_>, seed: &[f64]) -> Vec<f64> {
    let mut xy = seed.to_vec();
    for _ in 0..WEISZFELD_ITERATIONS {
        let point = Point::new(xy[0], xy[1]);
        let (mut sx, mut sy, mut weight) = (0.0, 0.0, 0.0);
        for c in problem.geometries.iter().filter_map(|g| closest_coord(&point, g)) {
            let d = (xy[0] - c.x).hypot(xy[1] - c.y);
            if d < SINGULAR_DISTANCE { continue }
            sx += c.x / d;
            sy += c.y / d;
            weight += 1.0 / d;
        }
        if weight == 0.0 { break }

        let next = vec![sx / weight, sy / weight];
        let step = (next[0] - xy[0]).hypot(next[1] - xy[1]);
        xy = next;
        if step < WEISZFELD_TOLERANCE { break }
    }
    xy
}
