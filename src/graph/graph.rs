use std::collections::BTreeSet;

use anyhow::{Result, ensure};

use crate::graph::Adjacency;

/// An undirected graph over observation indices, in compressed sparse row format.
///
/// Neighbor lists are sorted and deduplicated, so two graphs built from the same
/// connectivity pattern compare equal regardless of how the pattern was stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpatialGraph {
    size: usize,
    offsets: Vec<u32>,
    edges: Vec<u32>,
    edge_count: usize,
}

impl SpatialGraph {
    /// Build the graph from an adjacency matrix; every nonzero entry (i, j) becomes the edge {i, j}.
    /// The matrix must be square with one row per observation.
    pub fn from_adjacency(adjacency: &Adjacency, num_nodes: usize) -> Result<Self> {
        let (rows, cols) = adjacency.shape();
        ensure!(rows == cols,
            "[graph] shape mismatch: adjacency is {rows}x{cols}, expected a square matrix");
        ensure!(rows == num_nodes,
            "[graph] shape mismatch: adjacency is {rows}x{cols} but there are {num_nodes} observations");

        let pairs = match adjacency {
            Adjacency::Sparse(matrix) => (0..rows)
                .flat_map(move |i| matrix.row(i).filter(|&(_, v)| v != 0.0).map(move |(j, _)| (i, j)))
                .collect::<Vec<_>>(),
            Adjacency::Dense(matrix) => matrix.indexed_iter()
                .filter(|&(_, &v)| v != 0.0)
                .map(|((i, j), _)| (i, j))
                .collect::<Vec<_>>(),
        };

        Ok(Self::from_pairs(num_nodes, pairs))
    }

    /// Build the graph from undirected node pairs.
    pub(crate) fn from_pairs(num_nodes: usize, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut neighbors = vec![BTreeSet::<u32>::new(); num_nodes];
        for (i, j) in pairs {
            neighbors[i].insert(j as u32);
            neighbors[j].insert(i as u32);
        }

        let edge_count = neighbors.iter().enumerate()
            .map(|(i, set)| set.iter().filter(|&&j| j as usize >= i).count())
            .sum();

        Self {
            size: num_nodes,
            offsets: std::iter::once(0u32).chain(
                neighbors.iter()
                    .map(|set| set.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: neighbors.iter().flatten().copied().collect(),
            edge_count,
        }
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.size }

    /// Get the number of undirected edges, self-loops included.
    #[inline] pub fn edge_count(&self) -> usize { self.edge_count }

    /// Get the range of edges for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node, in ascending order.
    #[inline]
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Get an iterator over every undirected edge once, as (i, j) with i <= j.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| {
            self.neighbors(i)
                .filter(move |&j| j >= i)
                .map(move |j| (i, j))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CsrMatrix;
    use ndarray::{Array2, array};

    fn make_dense() -> Array2<f64> {
        array![
            [0.0, 1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn csr_graph_construction() {
        let graph = SpatialGraph::from_adjacency(&Adjacency::Dense(make_dense()), 4).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        // Offsets are cumulative neighbor counts, len = nodes + 1
        assert_eq!(graph.offsets, vec![0, 2, 4, 7, 8]);
        assert_eq!(graph.edges, vec![1, 2, 0, 2, 0, 1, 3, 2]);

        for window in graph.offsets.windows(2) { assert!(window[0] <= window[1]) }
    }

    #[test]
    fn degree_and_neighbors_match_offsets() {
        let graph = SpatialGraph::from_adjacency(&Adjacency::Dense(make_dense()), 4).unwrap();

        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(2), 3);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.neighbors(2).collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn sparse_and_dense_give_equal_graphs() {
        let dense = make_dense();
        let triplets = dense.indexed_iter()
            .filter(|&(_, &v)| v != 0.0)
            .map(|((i, j), &v)| (i, j, v))
            .collect::<Vec<_>>();
        let sparse = CsrMatrix::from_triplets((4, 4), &triplets).unwrap();

        let from_dense = SpatialGraph::from_adjacency(&Adjacency::Dense(dense), 4).unwrap();
        let from_sparse = SpatialGraph::from_adjacency(&Adjacency::Sparse(sparse), 4).unwrap();
        assert_eq!(from_dense, from_sparse);
    }

    #[test]
    fn one_sided_entries_are_symmetrized() {
        let sparse = CsrMatrix::from_triplets((3, 3), &[(0, 1, 1.0), (2, 1, 3.0)]).unwrap();
        let graph = SpatialGraph::from_adjacency(&Adjacency::Sparse(sparse), 3).unwrap();

        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn stored_zeros_are_not_edges() {
        let sparse = CsrMatrix::from_triplets((2, 2), &[(0, 1, 0.0)]).unwrap();
        let graph = SpatialGraph::from_adjacency(&Adjacency::Sparse(sparse), 2).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_loops_count_once() {
        let graph = SpatialGraph::from_adjacency(&Adjacency::Dense(array![[1.0, 0.0], [0.0, 0.0]]), 2).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn non_square_adjacency_is_a_shape_error() {
        let adjacency = Adjacency::Dense(Array2::zeros((3, 4)));
        let err = SpatialGraph::from_adjacency(&adjacency, 3).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }

    #[test]
    fn mis_sized_adjacency_is_a_shape_error() {
        let adjacency = Adjacency::Sparse(CsrMatrix::from_triplets((5, 5), &[]).unwrap());
        let err = SpatialGraph::from_adjacency(&adjacency, 4).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"), "{err}");
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = SpatialGraph::from_pairs(0, []);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.offsets, vec![0]);
    }

    #[test]
    #[should_panic]
    fn degree_panics_for_out_of_bounds_node() {
        let graph = SpatialGraph::from_pairs(2, [(0, 1)]);
        graph.degree(graph.node_count());
    }
}
