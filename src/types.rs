use serde::{Deserialize, Serialize};

/// Stable key for a precinct across the whole pipeline.
/// Keeps the original record id text (with leading zeros) verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Axis-aligned lon/lat bounds of a vertex ring.
///
/// Fresh boxes start from ±999 sentinels; valid longitudes and
/// latitudes never exceed ±180, so the first real vertex always
/// replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BBox {
    pub const EMPTY: Self = Self {
        min_lon: 999.0,
        max_lon: -999.0,
        min_lat: 999.0,
        max_lat: -999.0,
    };

    /// Grow the box to cover one more vertex.
    pub fn extend(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
    }

    /// Longitude intervals overlap.
    #[inline]
    pub fn lon_overlaps(&self, other: &BBox) -> bool {
        self.min_lon <= other.max_lon && other.min_lon <= self.max_lon
    }

    /// Latitude intervals overlap.
    #[inline]
    pub fn lat_overlaps(&self, other: &BBox) -> bool {
        self.min_lat <= other.max_lat && other.min_lat <= self.max_lat
    }

    /// Loose candidate test for the adjacency prune: overlap on either
    /// axis admits the pair. An OR of the two interval tests keeps more
    /// pairs than the usual separating-axis AND, trading extra exact
    /// checks for zero false negatives.
    #[inline]
    pub fn may_border(&self, other: &BBox) -> bool {
        self.lon_overlaps(other) || self.lat_overlaps(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> BBox {
        BBox { min_lon, max_lon, min_lat, max_lat }
    }

    #[test]
    fn empty_sentinels_are_replaced_by_first_vertex() {
        let mut b = BBox::EMPTY;
        b.extend(-122.3, 47.6);
        assert_eq!(b, bbox(-122.3, -122.3, 47.6, 47.6));
    }

    #[test]
    fn extend_tracks_extrema() {
        let mut b = BBox::EMPTY;
        b.extend(0.0, 0.0);
        b.extend(-1.0, 2.0);
        b.extend(3.0, -4.0);
        assert_eq!(b, bbox(-1.0, 3.0, -4.0, 2.0));
    }

    #[test]
    fn may_border_is_an_or_of_axis_overlaps() {
        let a = bbox(0.0, 1.0, 0.0, 1.0);

        // Overlap on both axes.
        assert!(a.may_border(&bbox(0.5, 1.5, 0.5, 1.5)));
        // Overlap on longitude only.
        assert!(a.may_border(&bbox(0.5, 1.5, 5.0, 6.0)));
        // Overlap on latitude only.
        assert!(a.may_border(&bbox(5.0, 6.0, 0.5, 1.5)));
        // Disjoint on both axes.
        assert!(!a.may_border(&bbox(5.0, 6.0, 5.0, 6.0)));
    }

    #[test]
    fn shared_boundary_counts_as_overlap() {
        let a = bbox(0.0, 1.0, 0.0, 1.0);
        let b = bbox(1.0, 2.0, 5.0, 6.0);
        assert!(a.lon_overlaps(&b));
        assert!(a.may_border(&b));
    }
}
