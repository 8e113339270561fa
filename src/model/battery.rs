use geo::{Coord, Geometry, Point};

use crate::model::{Attributes, Sited};

/// A battery bank serving a group of drop poles.
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    pub id: String,
    pub point: Point<f64>,
    /// Summed daily demand of every customer behind `drop_poles`.
    pub demand_kwh_per_day: f64,
    /// Indices into the drop poles the battery was grouped from.
    pub drop_poles: Vec<usize>,
    /// Indices into the full pole list of poles carrying this battery's panels.
    pub panel_poles: Vec<usize>,
    pub attributes: Attributes,
}

impl Battery {
    pub fn new(id: impl Into<String>, point: Point<f64>) -> Self {
        Self {
            id: id.into(),
            point,
            demand_kwh_per_day: 0.0,
            drop_poles: Vec::new(),
            panel_poles: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    #[inline] pub fn xy(&self) -> Coord<f64> { self.point.0 }

    /// Panels actually placed for this battery.
    #[inline] pub fn panel_count(&self) -> usize { self.panel_poles.len() }
}

impl Sited for Battery {
    #[inline] fn id(&self) -> &str { &self.id }

    #[inline] fn geometry(&self) -> Geometry<f64> { Geometry::Point(self.point) }
}
