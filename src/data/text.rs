//! Whitespace-delimited numeric text.
//!
//! Lines are split on any whitespace, `#` starts a comment, and blank lines
//! are ignored. A matrix must be rectangular. A vector is either one value
//! per line or a single line of values, with at least two values.

use std::io::Read;
use std::str::FromStr;

use ndarray::{Array1, Array2};

use crate::error::{LoadError, Result};

/// Read a stream to the end, attributing failures to `resource`.
pub fn read_text(mut reader: impl Read, resource: &str) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| LoadError::io(resource, e))?;
    Ok(text)
}

/// Split text into rows of parsed tokens.
fn parse_rows<T: FromStr>(text: &str, resource: &str) -> Result<Vec<Vec<T>>> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let mut row = Vec::new();
        for tok in content.split_whitespace() {
            let value = tok.parse::<T>().map_err(|_| {
                LoadError::invalid_data(
                    resource,
                    format!("line {}: '{tok}' is not a valid number", line_no + 1),
                )
            })?;
            row.push(value);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Parse a rectangular float matrix; a single row or column stays 2-D.
pub fn parse_matrix(text: &str, resource: &str) -> Result<Array2<f64>> {
    let rows = parse_rows::<f64>(text, resource)?;
    let n_rows = rows.len();
    let Some(n_cols) = rows.first().map(Vec::len) else {
        return Err(LoadError::invalid_data(resource, "Not a matrix: no rows"));
    };

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        return Err(LoadError::invalid_data(
            resource,
            format!(
                "Not a matrix: row {} has {} columns, expected {n_cols}",
                i + 1,
                row.len()
            ),
        ));
    }

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| LoadError::invalid_data(resource, format!("Not a matrix: {e}")))
}

/// Parse an integer vector laid out as a column or as a single row.
///
/// A file holding exactly one value is a scalar, not a vector, and is
/// rejected; so is a layout with several rows of several values.
pub fn parse_vector(text: &str, resource: &str) -> Result<Array1<i64>> {
    let rows = parse_rows::<i64>(text, resource)?;
    if let [row] = rows.as_slice() {
        if row.len() == 1 {
            return Err(LoadError::invalid_data(
                resource,
                "not a vector: a single value",
            ));
        }
    }
    let is_column = rows.iter().all(|r| r.len() == 1);

    if is_column || rows.len() == 1 {
        Ok(Array1::from_vec(rows.into_iter().flatten().collect()))
    } else {
        Err(LoadError::invalid_data(
            resource,
            format!("not a vector: {} rows with several values each", rows.len()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_matrix_basic() {
        let m = parse_matrix("0 0\n1 1\n5\t5\n", "x2.data.gz").unwrap();
        assert_eq!(m, array![[0.0, 0.0], [1.0, 1.0], [5.0, 5.0]]);
    }

    #[test]
    fn test_matrix_comments_and_blank_lines() {
        let m = parse_matrix("# header\n\n1.5 2  # trailing\n   \n-3e2 4\n", "f").unwrap();
        assert_eq!(m, array![[1.5, 2.0], [-300.0, 4.0]]);
    }

    #[test]
    fn test_single_row_and_single_column_stay_matrices() {
        assert_eq!(parse_matrix("1 2 3\n", "f").unwrap().dim(), (1, 3));
        assert_eq!(parse_matrix("1\n2\n3\n", "f").unwrap().dim(), (3, 1));
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let err = parse_matrix("1 2\n3\n", "x2.data.gz").unwrap_err();
        assert!(err.is_invalid_data());
        assert!(err.to_string().contains("Not a matrix"));
        assert!(err.to_string().contains("x2.data.gz"));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        assert!(parse_matrix("# nothing\n\n", "f").unwrap_err().is_invalid_data());
    }

    #[test]
    fn test_bad_token_reports_line() {
        let err = parse_matrix("1 2\n3 x\n", "f").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_vector_column_and_row() {
        assert_eq!(parse_vector("1\n1\n2\n", "l").unwrap(), array![1, 1, 2]);
        assert_eq!(parse_vector("1 1 2\n", "l").unwrap(), array![1, 1, 2]);
        assert_eq!(parse_vector("", "l").unwrap().len(), 0);
    }

    #[test]
    fn test_vector_rejects_matrix_layout() {
        assert!(parse_vector("1 2\n3 4\n", "l").unwrap_err().is_invalid_data());
    }

    #[test]
    fn test_vector_rejects_single_value() {
        let err = parse_vector("7\n", "x.labels0.gz").unwrap_err();
        assert!(err.is_invalid_data());
        assert!(err.to_string().contains("x.labels0.gz"));
        assert_eq!(parse_vector("7\n8\n", "l").unwrap(), array![7, 8]);
    }

    #[test]
    fn test_vector_rejects_floats() {
        assert!(parse_vector("1\n2.5\n", "l").unwrap_err().is_invalid_data());
    }

    proptest! {
        #[test]
        fn prop_rectangular_text_keeps_shape(n_rows in 1usize..20, n_cols in 1usize..6, seed in any::<i32>()) {
            let text: String = (0..n_rows)
                .map(|i| {
                    (0..n_cols)
                        .map(|j| format!("{}", (seed as i64 + (i * n_cols + j) as i64) as f64 / 4.0))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n");
            let m = parse_matrix(&text, "f").unwrap();
            prop_assert_eq!(m.dim(), (n_rows, n_cols));
        }

        #[test]
        fn prop_one_short_row_is_rejected(n_rows in 2usize..20, n_cols in 2usize..6, bad in 0usize..20) {
            let bad = bad % n_rows;
            let text: String = (0..n_rows)
                .map(|i| {
                    let width = if i == bad { n_cols - 1 } else { n_cols };
                    vec!["1"; width].join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n");
            prop_assert!(parse_matrix(&text, "f").unwrap_err().is_invalid_data());
        }
    }
}
