use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use geo::{Coord, Rect};
use ndarray::Array2;
use polars::{frame::DataFrame, prelude::DataType};

use crate::{catalog::ClusterLabels, io};

/// Columns accepted for event magnitude, in order of preference.
const MAGNITUDE_COLUMNS: [&str; 2] = ["magnitude", "mag"];

/// A validated earthquake catalog: one row per event.
///
/// Required columns are extracted once into typed vectors; cluster-label columns are
/// looked up by name on demand since the caller decides which assignment to plot.
#[derive(Clone, Debug)]
pub struct Catalog {
    data: DataFrame,
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    depth: Vec<f64>,
    magnitude: Vec<f64>,
    id: Vec<String>,
    place: Vec<String>,
}

impl Catalog {
    /// Validate a DataFrame and build a catalog from it.
    pub fn new(data: DataFrame) -> Result<Self> {
        let magnitude_column = MAGNITUDE_COLUMNS.iter()
            .copied()
            .find(|name| data.column(name).is_ok())
            .with_context(|| format!("[catalog] missing magnitude column (expected one of {MAGNITUDE_COLUMNS:?})"))?;

        Ok(Self {
            longitude: numeric_column(&data, "longitude")?,
            latitude: numeric_column(&data, "latitude")?,
            depth: numeric_column(&data, "depth")?,
            magnitude: numeric_column(&data, magnitude_column)?,
            id: text_column(&data, "id")?,
            place: text_column(&data, "place")?,
            data,
        })
    }

    /// Read a catalog from a CSV file with a header row.
    pub fn read_csv(path: &Path) -> Result<Self> {
        Self::new(io::csv::read_csv(path)?)
            .with_context(|| format!("[catalog] invalid catalog in {}", path.display()))
    }

    /// Get the number of events.
    #[inline] pub fn len(&self) -> usize { self.longitude.len() }

    /// Check if the catalog has no events.
    #[inline] pub fn is_empty(&self) -> bool { self.longitude.is_empty() }

    /// Get a reference to the underlying DataFrame.
    #[inline] pub fn data(&self) -> &DataFrame { &self.data }

    #[inline] pub fn longitudes(&self) -> &[f64] { &self.longitude }

    #[inline] pub fn latitudes(&self) -> &[f64] { &self.latitude }

    /// Event depths in kilometers (positive down).
    #[inline] pub fn depths(&self) -> &[f64] { &self.depth }

    #[inline] pub fn magnitudes(&self) -> &[f64] { &self.magnitude }

    #[inline] pub fn ids(&self) -> &[String] { &self.id }

    #[inline] pub fn places(&self) -> &[String] { &self.place }

    /// Event epicenters as lon/lat coordinates.
    pub fn coords(&self) -> Vec<Coord<f64>> {
        self.longitude.iter().zip(&self.latitude)
            .map(|(&x, &y)| Coord { x, y })
            .collect()
    }

    /// Bounding rectangle of all epicenters, or None for an empty catalog.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        bounding_rect(&self.coords())
    }

    /// Factorize the named cluster column.
    pub fn labels(&self, column: &str) -> Result<ClusterLabels> {
        let column = self.data.column(column)
            .with_context(|| format!("[catalog] missing cluster column {column:?}"))?;
        ClusterLabels::from_column(column)
    }

    /// Build a feature matrix (rows x columns) from named numeric columns.
    pub fn features(&self, columns: &[&str]) -> Result<Array2<f64>> {
        ensure!(!columns.is_empty(), "[catalog] at least one feature column is required");

        let mut features = Array2::<f64>::zeros((self.len(), columns.len()));
        for (j, name) in columns.iter().enumerate() {
            for (i, value) in numeric_column(&self.data, name)?.into_iter().enumerate() {
                features[[i, j]] = value;
            }
        }

        Ok(features)
    }
}

/// Bounding rectangle of a set of coordinates.
pub(crate) fn bounding_rect(coords: &[Coord<f64>]) -> Option<Rect<f64>> {
    let first = *coords.first()?;
    let (min, max) = coords.iter().fold((first, first), |(min, max), c| {
        (Coord { x: min.x.min(c.x), y: min.y.min(c.y) }, Coord { x: max.x.max(c.x), y: max.y.max(c.y) })
    });
    Some(Rect::new(min, max))
}

/// Extract a required numeric column as f64, rejecting nulls and non-numeric values.
fn numeric_column(data: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = data.column(name)
        .with_context(|| format!("[catalog] missing column {name:?}"))?;

    if matches!(column.dtype(), DataType::String) {
        bail!("[catalog] column {name:?} is not numeric");
    }

    let cast = column.cast(&DataType::Float64)
        .with_context(|| format!("[catalog] column {name:?} is not numeric"))?;
    let values = cast.f64()
        .with_context(|| format!("[catalog] column {name:?} is not numeric"))?;
    ensure!(values.null_count() == 0, "[catalog] column {name:?} has missing values");

    Ok(values.into_no_null_iter().collect())
}

/// Extract a required column rendered as text; nulls become empty strings.
fn text_column(data: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = data.column(name)
        .with_context(|| format!("[catalog] missing column {name:?}"))?;
    let cast = column.cast(&DataType::String)
        .with_context(|| format!("[catalog] column {name:?} cannot be read as text"))?;
    let values = cast.str()
        .with_context(|| format!("[catalog] column {name:?} cannot be read as text"))?;

    Ok(values.into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect())
}
