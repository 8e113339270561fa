use std::fmt;

use geo::{Coord, Geometry, Point};

use crate::model::{Attributes, Sited};

/// Mechanical pole design, chosen from the pole's place in the backbone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PoleType {
    /// Line end, sharp turn, or panel mount.
    Compact,
    /// Straight-through or gently angled pole.
    Spread,
}

impl fmt::Display for PoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoleType::Compact => write!(f, "compact"),
            PoleType::Spread => write!(f, "spread"),
        }
    }
}

/// A placed pole. Drop poles own the customers they feed; distribution
/// poles are interpolated along backbone lines and own none.
///
/// Flags and type accumulate as later stages run.
#[derive(Debug, Clone, PartialEq)]
pub struct Pole {
    pub id: String,
    pub point: Point<f64>,
    pub pole_type: Option<PoleType>,
    pub has_one: bool,
    pub has_panel: bool,
    pub has_lamp: bool,
    pub has_angle: bool,
    /// Indices into the planning run's customer list.
    pub connected_customers: Vec<usize>,
    pub attributes: Attributes,
}

impl Pole {
    pub fn new(id: impl Into<String>, point: Point<f64>) -> Self {
        Self {
            id: id.into(),
            point,
            pole_type: None,
            has_one: false,
            has_panel: false,
            has_lamp: false,
            has_angle: false,
            connected_customers: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Get the pole position as a coordinate.
    #[inline] pub fn xy(&self) -> Coord<f64> { self.point.0 }

    /// Number of customers fed by this pole.
    #[inline] pub fn customer_count(&self) -> usize { self.connected_customers.len() }
}

impl Sited for Pole {
    #[inline] fn id(&self) -> &str { &self.id }

    #[inline] fn geometry(&self) -> Geometry<f64> { Geometry::Point(self.point) }
}
