mod plan;

pub use plan::{plan_network, DistributionPlan};
