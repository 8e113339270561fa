mod battery;
mod customer;
mod entity;
mod pole;
mod road;

pub use battery::Battery;
pub use customer::Customer;
pub use entity::{Attributes, Sited};
pub use pole::{Pole, PoleType};
pub use road::Road;
