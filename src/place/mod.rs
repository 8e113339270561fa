mod facility;
mod median;

pub use facility::{estimate_group_count, place_drop_poles};
pub use median::place_representative_point;
