use geo::{Geometry, LineString};

use crate::model::{Attributes, Sited};

/// A road centerline that distribution lines may follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub id: String,
    pub geometry: LineString<f64>,
    pub attributes: Attributes,
}

impl Road {
    pub fn new(id: impl Into<String>, geometry: impl Into<LineString<f64>>) -> Self {
        Self { id: id.into(), geometry: geometry.into(), attributes: Attributes::new() }
    }
}

impl Sited for Road {
    #[inline] fn id(&self) -> &str { &self.id }

    #[inline] fn geometry(&self) -> Geometry<f64> { Geometry::LineString(self.geometry.clone()) }
}
