mod kmeans;
mod service;

pub use kmeans::cluster_by_centroid;
pub use service::{split_into_service_groups, ServicePolygon};
