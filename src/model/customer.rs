use geo::Geometry;

use crate::model::{Attributes, Sited};

/// A household or building to be connected, as a point or footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub geometry: Geometry<f64>,
    pub demand_kwh_per_day: f64,

    // Filled in by drop-pole placement.
    pub pole_id: Option<String>,
    pub drop_line_length_m: Option<f64>,

    pub attributes: Attributes,
}

impl Customer {
    pub fn new(id: impl Into<String>, geometry: impl Into<Geometry<f64>>, demand_kwh_per_day: f64) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            demand_kwh_per_day,
            pole_id: None,
            drop_line_length_m: None,
            attributes: Attributes::new(),
        }
    }

    /// Attach passthrough attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

impl Sited for Customer {
    #[inline] fn id(&self) -> &str { &self.id }

    #[inline] fn geometry(&self) -> Geometry<f64> { self.geometry.clone() }
}
