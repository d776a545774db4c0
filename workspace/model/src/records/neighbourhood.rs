use geojson::Geometry;

/// A neighbourhood boundary feature from the GeoJSON input.
///
/// `id` is assigned sequentially at load time (the feature's position in the
/// collection) so lookups from aggregated rows to geometry stay unambiguous
/// regardless of what the source file carries. Used only for rendering;
/// aggregation joins on the name string.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbourhood {
    /// Sequential feature id, stable for the process lifetime.
    pub id: i64,
    /// Neighbourhood name from the feature's `neighbourhood` property.
    /// Empty when the source feature lacks the property.
    pub name: String,
    /// The polygon (or multi-polygon) boundary to draw.
    pub geometry: Geometry,
}

impl Neighbourhood {
    /// Creates a new Neighbourhood feature.
    pub fn new(id: i64, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id,
            name: name.into(),
            geometry,
        }
    }
}
