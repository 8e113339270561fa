use geo::Geometry;

/// Passthrough attributes carried from the geometry provider to the
/// persistence layer. Planning code never reads them.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// An identified entity with a position in projected meters.
///
/// The clusterer and the facility placer work over anything `Sited`, so
/// customers and poles share one grouping implementation.
pub trait Sited {
    fn id(&self) -> &str;

    /// The entity's geometry in a locally flat metric coordinate system.
    fn geometry(&self) -> Geometry<f64>;
}

impl<T: Sited + ?Sized> Sited for &T {
    #[inline] fn id(&self) -> &str { (**self).id() }

    #[inline] fn geometry(&self) -> Geometry<f64> { (**self).geometry() }
}
