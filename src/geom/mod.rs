mod angle;
mod buffer;
mod measure;
mod overlay;
mod segment;
mod zones;

pub(crate) use angle::turning_angle;
pub(crate) use buffer::buffer;
pub(crate) use measure::{closest_coord, distance_to};
pub(crate) use overlay::disjoint_polygons;
pub(crate) use segment::{line_segments, link_segments, nearest_segment, segment_length, tie_in_segments};
pub(crate) use zones::BufferZones;
