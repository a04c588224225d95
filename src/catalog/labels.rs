use std::collections::HashMap;

use anyhow::{Context, Result, ensure};
use polars::prelude::{Column, DataType};

/// Cluster assignments for every row of a catalog, factorized into dense codes.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterLabels {
    codes: Vec<u32>,
    names: Vec<String>,
    positions: Vec<f64>,
}

impl ClusterLabels {
    /// Factorize a sequence of label strings.
    /// Distinct labels are ordered numerically when every label is a number, lexically otherwise.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = labels.into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .collect::<Vec<_>>();

        let mut names = raw.clone();
        names.sort();
        names.dedup();

        let numeric = names.iter()
            .map(|name| name.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<f64>>>();

        let positions = match numeric {
            Some(values) => {
                let mut pairs = names.into_iter().zip(values).collect::<Vec<_>>();
                pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
                let (sorted, values): (Vec<String>, Vec<f64>) = pairs.into_iter().unzip();
                names = sorted;
                values
            }
            None => (0..names.len()).map(|i| i as f64).collect(),
        };

        let index = names.iter()
            .enumerate()
            .map(|(code, name)| (name.as_str(), code as u32))
            .collect::<HashMap<_, _>>();

        let codes = raw.iter()
            .map(|label| index[label.as_str()])
            .collect();

        Self { codes, names, positions }
    }

    /// Factorize a polars column of integer or categorical labels.
    pub(crate) fn from_column(column: &Column) -> Result<Self> {
        let cast = column.cast(&DataType::String)
            .with_context(|| format!("[catalog] cluster column {:?} cannot be read as labels", column.name()))?;
        let values = cast.str()
            .with_context(|| format!("[catalog] cluster column {:?} cannot be read as labels", column.name()))?;
        ensure!(values.null_count() == 0, "[catalog] cluster column {:?} has missing labels", column.name());

        Ok(Self::from_labels(values.into_no_null_iter()))
    }

    /// Number of labelled rows.
    #[inline] pub fn len(&self) -> usize { self.codes.len() }

    /// Check if there are no labelled rows.
    #[inline] pub fn is_empty(&self) -> bool { self.codes.is_empty() }

    /// Number of distinct clusters.
    #[inline] pub fn num_clusters(&self) -> usize { self.names.len() }

    /// Dense cluster code of every row, in `0..num_clusters()`.
    #[inline] pub fn codes(&self) -> &[u32] { &self.codes }

    /// Distinct label names, indexed by code.
    #[inline] pub fn names(&self) -> &[String] { &self.names }

    /// Label name of a given row.
    #[inline] pub fn label(&self, row: usize) -> &str { &self.names[self.codes[row] as usize] }

    /// Numeric position of a cluster code on the color scale.
    #[inline] pub fn position(&self, code: u32) -> f64 { self.positions[code as usize] }

    /// Whether the labels were numeric (colored on a continuous scale with a colorbar).
    pub fn is_numeric(&self) -> bool {
        self.names.iter().all(|name| name.parse::<f64>().is_ok_and(f64::is_finite))
    }

    /// Range of numeric positions, used as the color normalization domain.
    pub fn position_range(&self) -> (f64, f64) {
        self.positions.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)))
    }

    /// Position of a cluster code normalized into [0, 1].
    pub fn normalized(&self, code: u32) -> f64 {
        let (lo, hi) = self.position_range();
        if hi > lo { (self.position(code) - lo) / (hi - lo) } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_labels_are_ordered_by_value() {
        let labels = ClusterLabels::from_labels(["10", "2", "-1", "2"]);
        assert_eq!(labels.names(), &["-1", "2", "10"]);
        assert_eq!(labels.codes(), &[2, 1, 0, 1]);
        assert_eq!(labels.position(2), 10.0);
        assert!(labels.is_numeric());
    }

    #[test]
    fn categorical_labels_are_ordered_lexically() {
        let labels = ClusterLabels::from_labels(["north", "east", "north"]);
        assert_eq!(labels.names(), &["east", "north"]);
        assert_eq!(labels.codes(), &[1, 0, 1]);
        assert_eq!(labels.label(0), "north");
        assert!(!labels.is_numeric());
    }

    #[test]
    fn normalization_spans_unit_interval() {
        let labels = ClusterLabels::from_labels(["0", "5", "10"]);
        assert_eq!(labels.normalized(0), 0.0);
        assert_eq!(labels.normalized(1), 0.5);
        assert_eq!(labels.normalized(2), 1.0);
    }

    #[test]
    fn single_cluster_normalizes_to_zero() {
        let labels = ClusterLabels::from_labels(["3", "3"]);
        assert_eq!(labels.num_clusters(), 1);
        assert_eq!(labels.normalized(0), 0.0);
    }
}
