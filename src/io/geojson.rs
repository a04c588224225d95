//! GeoJSON reading operations.

use anyhow::{Context, Result, anyhow, ensure};
use geo::{Coord, LineString};
use serde_json::Value;

/// Read every LineString and MultiLineString member of a GeoJSON FeatureCollection.
/// Features with other geometry types or a null geometry are skipped.
pub(crate) fn read_linestrings_from_geojson_bytes(bytes: &[u8]) -> Result<Vec<LineString<f64>>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON bytes")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] expected a FeatureCollection with a \"features\" array"))?;

    let mut lines = Vec::new();
    for feature in features {
        let Some(geometry) = feature["geometry"].as_object() else { continue };
        let Some(coords) = geometry.get("coordinates").and_then(|c| c.as_array()) else { continue };

        match geometry.get("type").and_then(|t| t.as_str()) {
            Some("LineString") => lines.push(parse_line_coords(coords)?),
            Some("MultiLineString") => {
                for part in coords {
                    let part = part.as_array()
                        .ok_or_else(|| anyhow!("[io::geojson] Invalid MultiLineString: part is not an array"))?;
                    lines.push(parse_line_coords(part)?);
                }
            }
            _ => {}
        }
    }

    Ok(lines)
}

/// Parse `[[x, y], [x, y], ...]` into a LineString; extra ordinates (z) are ignored.
fn parse_line_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let points = coords.iter()
        .map(|position| {
            let position = position.as_array()
                .ok_or_else(|| anyhow!("[io::geojson] Invalid position: not an array"))?;
            ensure!(position.len() >= 2, "[io::geojson] Invalid position: fewer than two ordinates");
            let x = position[0].as_f64().ok_or_else(|| anyhow!("[io::geojson] Invalid x ordinate"))?;
            let y = position[1].as_f64().ok_or_else(|| anyhow!("[io::geojson] Invalid y ordinate"))?;
            Ok(Coord { x, y })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LineString::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_line_and_multiline_features() {
        let geojson = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1, 5]]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "MultiLineString", "coordinates": [[[2, 2], [3, 3]], [[4, 4], [5, 5]]]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [9, 9]}},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        }"#;

        let lines = read_linestrings_from_geojson_bytes(geojson).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].0, vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }]);
        assert_eq!(lines[2].0[1], Coord { x: 5.0, y: 5.0 });
    }

    #[test]
    fn rejects_non_collections() {
        assert!(read_linestrings_from_geojson_bytes(br#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
        assert!(read_linestrings_from_geojson_bytes(b"not json").is_err());
    }

    #[test]
    fn rejects_malformed_positions() {
        let geojson = br#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0], [1, 1]]}}
        ]}"#;
        assert!(read_linestrings_from_geojson_bytes(geojson).is_err());
    }
}
