use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::DataMatrix;

/// Transformation applied to a freshly loaded data matrix.
///
/// Implementations must be deterministic for a given input and `Some(seed)`.
pub trait Preprocess {
    fn preprocess(&self, data: DataMatrix, random_seed: Option<u64>) -> DataMatrix;
}

/// Leaves the matrix untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preprocess for Identity {
    fn preprocess(&self, data: DataMatrix, _random_seed: Option<u64>) -> DataMatrix {
        data
    }
}

// ---------------------------------------------------------------------------
// StandardPreprocessor
// ---------------------------------------------------------------------------

/// Default normalisation of benchmark data.
///
/// 1. columns of zero variance are removed,
/// 2. every column is centred at 0,
/// 3. all columns are divided by one common factor, the standard deviation
///    of all entries, so relative axis scales are kept,
/// 4. Gaussian white noise with standard deviation `noise_factor` times the
///    column's standard deviation is added, so no two points coincide.
#[derive(Debug, Clone, Copy)]
pub struct StandardPreprocessor {
    pub noise_factor: f64,
}

impl Default for StandardPreprocessor {
    fn default() -> Self {
        Self { noise_factor: 1e-6 }
    }
}

impl Preprocess for StandardPreprocessor {
    fn preprocess(&self, data: DataMatrix, random_seed: Option<u64>) -> DataMatrix {
        let data = drop_constant_columns(data);
        if data.is_empty() {
            return data;
        }

        let Some(mean) = data.mean_axis(Axis(0)) else {
            return data;
        };
        let mut data = data - &mean;

        let total_sd = (data.mapv(|v| v * v).sum() / data.len() as f64).sqrt();
        if total_sd > 0.0 {
            data /= total_sd;
        }

        if self.noise_factor > 0.0 {
            let mut rng = match random_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let col_sd = data.std_axis(Axis(0), 0.0);
            for mut row in data.rows_mut() {
                for (v, sd) in row.iter_mut().zip(col_sd.iter()) {
                    *v += gauss(&mut rng, 0.0, sd * self.noise_factor);
                }
            }
        }
        data
    }
}

fn drop_constant_columns(data: DataMatrix) -> DataMatrix {
    if data.nrows() == 0 {
        return data;
    }
    let var = data.var_axis(Axis(0), 0.0);
    let keep: Vec<usize> = var
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .map(|(j, _)| j)
        .collect();
    if keep.len() == data.ncols() {
        data
    } else {
        log::debug!("Dropping {} constant column(s)", data.ncols() - keep.len());
        data.select(Axis(1), &keep)
    }
}

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Convenience wrapper using [`StandardPreprocessor::default`].
pub fn preprocess_data(data: DataMatrix, random_seed: Option<u64>) -> Array2<f64> {
    StandardPreprocessor::default().preprocess(data, random_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_identity_is_noop() {
        let m = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(Identity.preprocess(m.clone(), Some(1)), m);
    }

    #[test]
    fn test_constant_columns_removed() {
        let m = array![[1.0, 7.0, 0.0], [2.0, 7.0, 1.0], [3.0, 7.0, 5.0]];
        let out = StandardPreprocessor { noise_factor: 0.0 }.preprocess(m, None);
        assert_eq!(out.ncols(), 2);
    }

    #[test]
    fn test_centred_and_unit_total_sd() {
        let m = array![[0.0, 0.0], [1.0, 10.0], [5.0, 20.0]];
        let out = StandardPreprocessor { noise_factor: 0.0 }.preprocess(m, None);
        for col in out.columns() {
            assert_abs_diff_eq!(col.sum(), 0.0, epsilon = 1e-12);
        }
        let total_sd = (out.mapv(|v| v * v).sum() / out.len() as f64).sqrt();
        assert_abs_diff_eq!(total_sd, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_common_scale_keeps_axis_ratio() {
        let m = array![[0.0, 0.0], [1.0, 10.0], [2.0, 20.0]];
        let out = StandardPreprocessor { noise_factor: 0.0 }.preprocess(m, None);
        assert_abs_diff_eq!(out[[2, 1]] / out[[2, 0]], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_same_seed_same_output() {
        let m = array![[0.0, 0.0], [1.0, 1.0], [1.0, 1.0], [5.0, 5.0]];
        let a = preprocess_data(m.clone(), Some(42));
        let b = preprocess_data(m.clone(), Some(42));
        let c = preprocess_data(m, Some(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_noise_separates_duplicates() {
        let m = array![[0.0, 0.0], [1.0, 1.0], [1.0, 1.0], [5.0, 5.0]];
        let out = preprocess_data(m, Some(0));
        assert_ne!(out.row(1), out.row(2));
        assert_abs_diff_eq!(out[[1, 0]], out[[2, 0]], epsilon = 1e-4);
    }
}
