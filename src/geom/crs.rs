use std::{fmt, str::FromStr};

use anyhow::{Context, Result, anyhow, bail};
use geo::Coord;
use proj4rs::{proj::Proj as Proj4, transform::transform};

/// PROJ.4 definition of geographic WGS84 (EPSG:4326), the frame fault lines are published in.
const WGS84_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// A parsed coordinate reference system descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crs {
    epsg: Option<u32>,
    proj4: String,
}

impl Crs {
    /// Parse `EPSG:<code>`, a bare EPSG code, or a PROJ.4 string starting with `+proj=`.
    pub fn parse(definition: &str) -> Result<Self> {
        let definition = definition.trim();
        let code = definition.get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("epsg:"))
            .map_or(definition, |_| &definition[5..]);

        let crs = if let Ok(epsg) = code.parse::<u32>() {
            let proj4 = epsg_proj4(epsg)
                .ok_or_else(|| anyhow!("[crs] invalid CRS {definition:?}: unsupported EPSG code {epsg}"))?;
            Self { epsg: Some(epsg), proj4 }
        } else if definition.starts_with("+proj=") {
            Self { epsg: None, proj4: definition.to_string() }
        } else {
            bail!("[crs] invalid CRS {definition:?}: expected EPSG:<code> or a PROJ.4 string");
        };

        crs.build()
            .with_context(|| format!("[crs] invalid CRS {definition:?}"))?;
        Ok(crs)
    }

    /// Geographic WGS84 (EPSG:4326).
    pub fn wgs84() -> Self {
        Self { epsg: Some(4326), proj4: WGS84_PROJ4.to_string() }
    }

    /// Get the EPSG code, if the CRS was given as one.
    #[inline] pub fn epsg(&self) -> Option<u32> { self.epsg }

    /// Get the PROJ.4 definition.
    #[inline] pub fn proj4(&self) -> &str { &self.proj4 }

    /// Whether coordinates are longitude/latitude in degrees.
    pub fn is_geographic(&self) -> bool {
        self.proj4.contains("+proj=longlat") || self.proj4.contains("+proj=latlong")
    }

    /// Whether coordinates are already WGS84 longitude/latitude.
    pub fn is_wgs84(&self) -> bool {
        self.epsg == Some(4326) || self.proj4 == WGS84_PROJ4
    }

    fn build(&self) -> Result<Proj4> {
        Proj4::from_proj_string(&self.proj4)
            .with_context(|| anyhow!("failed to build PROJ.4: {}", self.proj4))
    }

    /// Reproject coordinates from this CRS to WGS84 lon/lat degrees.
    pub fn to_wgs84(&self, coords: &[Coord<f64>]) -> Result<Vec<Coord<f64>>> {
        if self.is_wgs84() { return Ok(coords.to_vec()) }

        let from = self.build()?;
        let to = Crs::wgs84().build()?;
        let geographic = self.is_geographic();

        // Geographic input and output are in radians.
        coords.iter()
            .map(|coord| {
                let mut point = if geographic {
                    (coord.x.to_radians(), coord.y.to_radians(), 0.0)
                } else {
                    (coord.x, coord.y, 0.0)
                };
                transform(&from, &to, &mut point)
                    .with_context(|| format!("[crs] failed to transform ({}, {})", coord.x, coord.y))?;
                Ok(Coord { x: point.0.to_degrees(), y: point.1.to_degrees() })
            })
            .collect()
    }
}

impl FromStr for Crs {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(code) => write!(f, "EPSG:{code}"),
            None => write!(f, "{}", self.proj4),
        }
    }
}

/// PROJ.4 definition for the EPSG codes earthquake catalogs are commonly published in.
/// - 4326: WGS84, 4269: NAD83, 4258: ETRS89, 3857: Web Mercator
/// - 326zz / 327zz: WGS84 UTM north / south
fn epsg_proj4(code: u32) -> Option<String> {
    match code {
        4326 => Some(WGS84_PROJ4.to_string()),
        4269 => Some("+proj=longlat +datum=NAD83 +no_defs +type=crs".to_string()),
        4258 => Some("+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs".to_string()),
        3857 => Some("+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +no_defs +type=crs".to_string()),
        32601..=32660 => Some(format!("+proj=utm +zone={} +datum=WGS84 +units=m +no_defs +type=crs", code - 32600)),
        32701..=32760 => Some(format!("+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs +type=crs", code - 32700)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_epsg_forms() {
        assert_eq!(Crs::parse("EPSG:4326").unwrap(), Crs::wgs84());
        assert_eq!(Crs::parse("epsg:4326").unwrap(), Crs::wgs84());
        assert_eq!(Crs::parse("Epsg:4326").unwrap(), Crs::wgs84());
        assert_eq!(Crs::parse(" 4326 ").unwrap(), Crs::wgs84());
        assert_eq!(Crs::parse("EPSG:4269").unwrap().epsg(), Some(4269));
        assert_eq!("EPSG:32633".parse::<Crs>().unwrap().to_string(), "EPSG:32633");
    }

    #[test]
    fn unknown_epsg_is_invalid() {
        let err = Crs::parse("EPSG:99999").unwrap_err();
        assert!(err.to_string().contains("invalid CRS"), "{err}");
    }

    #[test]
    fn free_text_is_invalid() {
        assert!(Crs::parse("wgs-eighty-four").is_err());
        assert!(Crs::parse("").is_err());
    }

    #[test]
    fn wgs84_is_identity() {
        let coords = vec![Coord { x: 142.37, y: 38.3 }, Coord { x: -122.4, y: 37.8 }];
        assert_eq!(Crs::wgs84().to_wgs84(&coords).unwrap(), coords);
    }

    #[test]
    fn utm_central_meridian_maps_back_to_degrees() {
        let crs = Crs::parse("EPSG:32633").unwrap();
        assert!(!crs.is_geographic());

        let out = crs.to_wgs84(&[Coord { x: 500_000.0, y: 0.0 }]).unwrap();
        assert!((out[0].x - 15.0).abs() < 1e-6, "{:?}", out[0]);
        assert!(out[0].y.abs() < 1e-6, "{:?}", out[0]);
    }

    #[test]
    fn nad83_is_close_to_wgs84() {
        let crs = Crs::parse("EPSG:4269").unwrap();
        assert!(crs.is_geographic());

        let out = crs.to_wgs84(&[Coord { x: -117.5, y: 34.2 }]).unwrap();
        assert!((out[0].x + 117.5).abs() < 1e-4, "{:?}", out[0]);
        assert!((out[0].y - 34.2).abs() < 1e-4, "{:?}", out[0]);
    }
}
