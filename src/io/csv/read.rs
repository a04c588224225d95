//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, ensure};
use ndarray::Array2;
use polars::{frame::DataFrame, io::SerReader, prelude::{Column, CsvReadOptions, CsvReader, DataType}};

/// Reads a CSV file from `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a CSV from a string.
#[cfg(test)]
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReader::new(std::io::Cursor::new(csv.as_bytes()))
        .finish()
        .with_context(|| "[io::csv::read] Failed to read CSV from string")
}

/// Reads a CSV file without a header row (every row is data).
pub(crate) fn read_headerless_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReadOptions::default()
        .with_has_header(false)
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read headerless CSV from {:?}", path))
}

/// Read an edge list from a DataFrame.
///
/// The first two columns are the row and column index of each entry; an optional
/// third column holds the entry value (defaults to 1.0).
pub(crate) fn read_edge_list(df: &DataFrame) -> Result<Vec<(usize, usize, f64)>> {
    ensure!(df.width() >= 2, "[io::csv::read] edge list must have at least two columns: row,col[,value]");

    let columns = df.get_columns();
    let rows = index_column(&columns[0])?;
    let cols = index_column(&columns[1])?;
    let values = match columns.get(2) {
        Some(column) => float_column(column)?,
        None => vec![1.0; df.height()],
    };

    Ok(rows.into_iter()
        .zip(cols)
        .zip(values)
        .map(|((i, j), v)| (i, j, v))
        .collect())
}

/// Read a dense matrix from a headerless DataFrame, one CSV row per matrix row.
pub(crate) fn read_dense_matrix(df: &DataFrame) -> Result<Array2<f64>> {
    let (rows, cols) = (df.height(), df.width());
    let mut matrix = Array2::<f64>::zeros((rows, cols));

    for (j, column) in df.get_columns().iter().enumerate() {
        for (i, value) in float_column(column)?.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }

    Ok(matrix)
}

/// Cast a column to non-negative integer indices.
fn index_column(column: &Column) -> Result<Vec<usize>> {
    let cast = column.cast(&DataType::Int64)
        .with_context(|| format!("[io::csv::read] column {:?} is not an integer column", column.name()))?;
    let values = cast.i64()
        .with_context(|| format!("[io::csv::read] column {:?} is not an integer column", column.name()))?;
    ensure!(values.null_count() == 0, "[io::csv::read] column {:?} has missing or non-integer values", column.name());

    values.into_no_null_iter()
        .map(|v| {
            ensure!(v >= 0, "[io::csv::read] negative index {v} in column {:?}", column.name());
            Ok(v as usize)
        })
        .collect()
}

/// Cast a column to f64 values, rejecting nulls.
fn float_column(column: &Column) -> Result<Vec<f64>> {
    let cast = column.cast(&DataType::Float64)
        .with_context(|| format!("[io::csv::read] column {:?} is not numeric", column.name()))?;
    let values = cast.f64()
        .with_context(|| format!("[io::csv::read] column {:?} is not numeric", column.name()))?;
    ensure!(values.null_count() == 0, "[io::csv::read] column {:?} has missing or non-numeric values", column.name());

    Ok(values.into_no_null_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_list_defaults_value_to_one() {
        let df = read_csv_string("row,col\n0,1\n2,0\n").unwrap();
        let edges = read_edge_list(&df).unwrap();
        assert_eq!(edges, vec![(0, 1, 1.0), (2, 0, 1.0)]);
    }

    #[test]
    fn edge_list_reads_weight_column() {
        let df = read_csv_string("row,col,weight\n0,1,0.5\n1,2,2.0\n").unwrap();
        let edges = read_edge_list(&df).unwrap();
        assert_eq!(edges, vec![(0, 1, 0.5), (1, 2, 2.0)]);
    }

    #[test]
    fn edge_list_rejects_negative_indices() {
        let df = read_csv_string("row,col\n0,-1\n").unwrap();
        assert!(read_edge_list(&df).is_err());
    }

    #[test]
    fn edge_list_requires_two_columns() {
        let df = read_csv_string("row\n0\n").unwrap();
        assert!(read_edge_list(&df).is_err());
    }

    #[test]
    fn dense_matrix_keeps_row_major_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adj.csv");
        std::fs::write(&path, "0,1,0\n1,0,1\n0,1,0\n").unwrap();

        let matrix = read_dense_matrix(&read_headerless_csv(&path).unwrap()).unwrap();
        assert_eq!(matrix.dim(), (3, 3));
        assert_eq!(matrix[[0, 1]], 1.0);
        assert_eq!(matrix[[1, 2]], 1.0);
        assert_eq!(matrix[[2, 2]], 0.0);
    }
}
