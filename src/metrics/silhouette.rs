//! Silhouette coefficient for cluster quality.

use std::io::Write;

use anyhow::{Result, ensure};
use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::catalog::{Catalog, ClusterLabels};

/// Euclidean distance between two feature rows.
#[inline]
fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Silhouette coefficient of every sample.
///
/// For sample i with mean intra-cluster distance `a` and smallest mean distance to
/// another cluster `b`, the coefficient is `(b - a) / max(a, b)`. Samples in
/// singleton clusters score 0.
pub fn silhouette_samples(features: ArrayView2<f64>, labels: &ClusterLabels) -> Result<Array1<f64>> {
    let n = features.nrows();
    let k = labels.num_clusters();
    ensure!(n == labels.len(),
        "[silhouette] shape mismatch: feature matrix has {n} rows but there are {} labels", labels.len());
    ensure!(k >= 2 && k < n,
        "[silhouette] Number of labels is {k}. Valid values are 2 to n_samples - 1 (inclusive)");

    let codes = labels.codes();
    let mut sizes = vec![0usize; k];
    for &c in codes { sizes[c as usize] += 1 }

    let mut scores = Array1::<f64>::zeros(n);
    let mut sums = vec![0.0; k];

    for i in 0..n {
        sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n {
            if i != j {
                sums[codes[j] as usize] += euclidean(features.row(i), features.row(j));
            }
        }

        let own = codes[i] as usize;
        if sizes[own] <= 1 { continue }

        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        scores[i] = if denom > 0.0 { (b - a) / denom } else { 0.0 };
    }

    Ok(scores)
}

/// Mean silhouette coefficient over all samples, in [-1, 1].
pub fn silhouette_score(features: ArrayView2<f64>, labels: &ClusterLabels) -> Result<f64> {
    let scores = silhouette_samples(features, labels)?;
    Ok(scores.mean().unwrap_or(0.0))
}

/// Compute the silhouette score for a catalog's cluster column and write it as one line.
pub fn write_silhouette_score<W: Write>(writer: &mut W, features: ArrayView2<f64>, catalog: &Catalog, column: &str) -> Result<f64> {
    let labels = catalog.labels(column)?;
    let score = silhouette_score(features, &labels)?;
    writeln!(writer, "Silhouette Score: {score}")?;
    Ok(score)
}

/// Print the silhouette score of a catalog's cluster column to standard output.
pub fn report_silhouette_score(features: ArrayView2<f64>, catalog: &Catalog, column: &str) -> Result<()> {
    let stdout = std::io::stdout();
    write_silhouette_score(&mut stdout.lock(), features, catalog, column)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn two_tight_clusters_score_near_one() {
        let features = array![[0.0, 0.0], [0.0, 0.1], [10.0, 10.0], [10.0, 10.1]];
        let labels = ClusterLabels::from_labels(["0", "0", "1", "1"]);

        let score = silhouette_score(features.view(), &labels).unwrap();
        assert!(score > 0.98 && score <= 1.0, "{score}");
    }

    #[test]
    fn matches_hand_computed_value() {
        // 1-D points 0, 1 | 4: a(0) = 1, b(0) = 4 -> 0.75; a(1) = 1, b(1) = 3 -> 2/3; singleton -> 0.
        let features = array![[0.0], [1.0], [4.0]];
        let labels = ClusterLabels::from_labels(["a", "a", "b"]);

        let samples = silhouette_samples(features.view(), &labels).unwrap();
        assert!((samples[0] - 0.75).abs() < 1e-12);
        assert!((samples[1] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(samples[2], 0.0);

        let score = silhouette_score(features.view(), &labels).unwrap();
        assert!((score - (0.75 + 2.0 / 3.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn swapped_labels_score_negative() {
        let features = array![[0.0], [10.0], [0.1], [10.1]];
        let labels = ClusterLabels::from_labels(["0", "0", "1", "1"]);

        let score = silhouette_score(features.view(), &labels).unwrap();
        assert!(score < 0.0 && score >= -1.0, "{score}");
    }

    #[test]
    fn single_label_is_undefined() {
        let features = array![[0.0], [1.0], [2.0]];
        let labels = ClusterLabels::from_labels(["7", "7", "7"]);

        let err = silhouette_score(features.view(), &labels).unwrap_err();
        assert!(err.to_string().contains("Number of labels"), "{err}");
    }

    #[test]
    fn one_label_per_sample_is_undefined() {
        let features = array![[0.0], [1.0], [2.0]];
        let labels = ClusterLabels::from_labels(["0", "1", "2"]);
        assert!(silhouette_score(features.view(), &labels).is_err());
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let labels = ClusterLabels::from_labels(["0", "1", "1"]);

        let err = silhouette_score(features.view(), &labels).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }

    #[test]
    fn coincident_points_score_zero() {
        let features = array![[1.0], [1.0], [1.0], [1.0]];
        let labels = ClusterLabels::from_labels(["0", "0", "1", "1"]);
        assert_eq!(silhouette_score(features.view(), &labels).unwrap(), 0.0);
    }
}
