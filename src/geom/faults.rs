use anyhow::{Context, Result};
use geo::{BoundingRect, LineString, Rect};

use crate::io;

/// GEM Global Active Faults database, published as GeoJSON in WGS84 lon/lat.
pub const GEM_ACTIVE_FAULTS_URL: &str =
    "https://raw.githubusercontent.com/GEMScienceTools/gem-global-active-faults/master/geojson/gem_active_faults.geojson";

/// Fault traces as polylines in WGS84 lon/lat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaultLines {
    lines: Vec<LineString<f64>>,
}

impl FaultLines {
    /// Construct from polylines.
    pub fn new(lines: Vec<LineString<f64>>) -> Self {
        Self { lines }
    }

    /// Parse a GeoJSON FeatureCollection of LineString / MultiLineString features.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let lines = io::geojson::read_linestrings_from_geojson_bytes(bytes)
            .context("[faults] invalid fault-line GeoJSON")?;
        Ok(Self::new(lines))
    }

    /// Get the number of polylines.
    #[inline] pub fn len(&self) -> usize { self.lines.len() }

    /// Check if there are no polylines.
    #[inline] pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Get a reference to the list of polylines.
    #[inline] pub fn lines(&self) -> &[LineString<f64>] { &self.lines }

    /// Compute the bounding rectangle of all polylines.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.lines.iter()
            .filter_map(|line| line.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    geo::Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    geo::Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            })
    }
}

/// Fetch the GEM global active faults dataset. Every call downloads afresh.
#[cfg(feature = "download")]
pub fn fetch_fault_lines(verbose: u8) -> Result<FaultLines> {
    fetch_fault_lines_from(GEM_ACTIVE_FAULTS_URL, verbose)
}

/// Fetch fault lines from a GeoJSON URL. Every call downloads afresh.
#[cfg(feature = "download")]
pub fn fetch_fault_lines_from(url: &str, verbose: u8) -> Result<FaultLines> {
    let bytes = crate::common::fetch_bytes(url, verbose)
        .context("[faults] failed to fetch fault lines")?;
    let faults = FaultLines::from_geojson_bytes(&bytes)?;

    if verbose > 1 { eprintln!("[faults] {} polylines from {url}", faults.len()); }
    Ok(faults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, line_string};

    #[test]
    fn bounds_cover_every_polyline() {
        let faults = FaultLines::new(vec![
            line_string![(x: 140.0, y: 35.0), (x: 142.0, y: 38.0)],
            line_string![(x: -122.0, y: 36.0), (x: -121.0, y: 37.5)],
        ]);

        let bounds = faults.bounds().unwrap();
        assert_eq!(bounds.min(), Coord { x: -122.0, y: 35.0 });
        assert_eq!(bounds.max(), Coord { x: 142.0, y: 38.0 });
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let faults = FaultLines::from_geojson_bytes(br#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(faults.is_empty());
        assert!(faults.bounds().is_none());
    }

    #[cfg(feature = "download")]
    #[test]
    fn unreachable_source_fails_the_fetch() {
        let err = fetch_fault_lines_from("http://127.0.0.1:9/faults.geojson", 0).unwrap_err();
        assert!(err.to_string().contains("failed to fetch fault lines"), "{err}");
    }
}
