mod battery;
mod classify;
mod interpolate;
mod lamp;
mod panel;

pub use battery::{estimate_demand_kwh_per_day, place_batteries};
pub use classify::choose_pole_types;
pub use interpolate::{interpolated_pole_count, place_distribution_poles, DistributionPoles};
pub use lamp::{choose_lamp_poles, LampReport};
pub use panel::{assign_panel_poles, rank_poles_by_backbone_cost, required_panel_count};
