use std::path::Path;

use anyhow::{Result, ensure};
use ndarray::Array2;

use crate::io;

/// A sparse matrix in compressed sparse row format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsrMatrix {
    shape: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    /// Construct a matrix from raw CSR arrays, validating their consistency.
    pub fn new(shape: (usize, usize), indptr: Vec<usize>, indices: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        ensure!(indptr.len() == rows + 1, "[graph::csr] indptr len ({}) != rows + 1 ({})", indptr.len(), rows + 1);
        ensure!(indptr[0] == 0, "[graph::csr] indptr must start at 0");
        ensure!(indptr.windows(2).all(|w| w[0] <= w[1]), "[graph::csr] indptr must be non-decreasing");
        ensure!(indptr[rows] == indices.len(), "[graph::csr] last indptr ({}) != nnz ({})", indptr[rows], indices.len());
        ensure!(indices.len() == data.len(), "[graph::csr] indices len ({}) != data len ({})", indices.len(), data.len());
        if let Some(&j) = indices.iter().find(|&&j| j >= cols) {
            anyhow::bail!("[graph::csr] column index {j} out of bounds for {cols} columns");
        }

        Ok(Self { shape, indptr, indices, data })
    }

    /// Construct a matrix from (row, col, value) triplets; duplicate entries are summed.
    pub fn from_triplets(shape: (usize, usize), triplets: &[(usize, usize, f64)]) -> Result<Self> {
        let (rows, cols) = shape;
        for &(i, j, _) in triplets {
            ensure!(i < rows && j < cols, "[graph::csr] entry ({i}, {j}) out of bounds for shape {rows}x{cols}");
        }

        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(i, j, _)| (i, j));

        let mut indptr = vec![0usize; rows + 1];
        let mut indices = Vec::with_capacity(sorted.len());
        let mut data = Vec::with_capacity(sorted.len());
        let mut last: Option<(usize, usize)> = None;

        for (i, j, v) in sorted {
            if last == Some((i, j)) {
                if let Some(value) = data.last_mut() { *value += v }
                continue;
            }
            indices.push(j);
            data.push(v);
            indptr[i + 1] += 1;
            last = Some((i, j));
        }

        // prefix sums
        for i in 0..rows { indptr[i + 1] += indptr[i] }

        Self::new(shape, indptr, indices, data)
    }

    /// Get the (rows, cols) shape.
    #[inline] pub fn shape(&self) -> (usize, usize) { self.shape }

    /// Number of explicitly stored entries.
    #[inline] pub fn nnz(&self) -> usize { self.indices.len() }

    /// Get an iterator over the stored (column, value) entries of a row.
    #[inline]
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (self.indptr[row]..self.indptr[row + 1]).map(move |k| (self.indices[k], self.data[k]))
    }
}

/// Which observation pairs are connected, as a sparse or dense square matrix.
#[derive(Clone, Debug)]
pub enum Adjacency {
    Sparse(CsrMatrix),
    Dense(Array2<f64>),
}

impl Adjacency {
    /// Get the (rows, cols) shape of the matrix.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Adjacency::Sparse(matrix) => matrix.shape(),
            Adjacency::Dense(matrix) => matrix.dim(),
        }
    }

    /// Read a sparse adjacency from a CSV edge list (`row,col[,value]` with a header row).
    pub fn read_edge_list(path: &Path, num_nodes: usize) -> Result<Self> {
        let triplets = io::csv::read_edge_list(&io::csv::read_csv(path)?)?;
        Ok(Adjacency::Sparse(CsrMatrix::from_triplets((num_nodes, num_nodes), &triplets)?))
    }

    /// Read a dense adjacency from a headerless CSV matrix.
    pub fn read_dense(path: &Path) -> Result<Self> {
        Ok(Adjacency::Dense(io::csv::read_dense_matrix(&io::csv::read_headerless_csv(path)?)?))
    }
}

impl From<CsrMatrix> for Adjacency {
    fn from(matrix: CsrMatrix) -> Self { Adjacency::Sparse(matrix) }
}

impl From<Array2<f64>> for Adjacency {
    fn from(matrix: Array2<f64>) -> Self { Adjacency::Dense(matrix) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn triplets_are_sorted_and_summed() {
        let matrix = CsrMatrix::from_triplets((3, 3), &[(2, 0, 1.0), (0, 2, 1.0), (0, 1, 0.5), (0, 1, 0.5)]).unwrap();

        assert_eq!(matrix.nnz(), 3);
        assert_eq!(matrix.indptr, vec![0, 2, 2, 3]);
        assert_eq!(matrix.row(0).collect::<Vec<_>>(), vec![(1, 1.0), (2, 1.0)]);
        assert!(matrix.row(1).next().is_none());
        assert_eq!(matrix.row(2).collect::<Vec<_>>(), vec![(0, 1.0)]);
    }

    #[test]
    fn triplet_out_of_bounds_is_rejected() {
        assert!(CsrMatrix::from_triplets((2, 2), &[(0, 2, 1.0)]).is_err());
    }

    #[test]
    fn raw_arrays_are_validated() {
        assert!(CsrMatrix::new((2, 2), vec![0, 1], vec![0], vec![1.0]).is_err());
        assert!(CsrMatrix::new((2, 2), vec![0, 2, 1], vec![0, 1], vec![1.0, 1.0]).is_err());
        assert!(CsrMatrix::new((2, 2), vec![0, 1, 2], vec![0, 5], vec![1.0, 1.0]).is_err());
        assert!(CsrMatrix::new((2, 2), vec![0, 1, 2], vec![1, 0], vec![1.0]).is_err());
        assert!(CsrMatrix::new((2, 2), vec![0, 1, 2], vec![1, 0], vec![1.0, 1.0]).is_ok());
    }

    #[test]
    fn shape_reports_both_variants() {
        let dense = Adjacency::from(array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        let sparse = Adjacency::from(CsrMatrix::from_triplets((4, 4), &[]).unwrap());
        assert_eq!(dense.shape(), (2, 3));
        assert_eq!(sparse.shape(), (4, 4));
    }

    #[test]
    fn edge_list_file_becomes_sparse_adjacency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        std::fs::write(&path, "row,col\n0,1\n1,2\n").unwrap();

        match Adjacency::read_edge_list(&path, 3).unwrap() {
            Adjacency::Sparse(matrix) => {
                assert_eq!(matrix.shape(), (3, 3));
                assert_eq!(matrix.nnz(), 2);
            }
            Adjacency::Dense(_) => panic!("expected a sparse adjacency"),
        }
    }
}
