//! Pearson correlation over an observation matrix.
//!
//! Observations are rows and variables are columns:
//!
//! ```text
//! r_ij = Σ (x_i - x̄_i)(x_j - x̄_j) / sqrt(Σ (x_i - x̄_i)² · Σ (x_j - x̄_j)²)
//! ```
//!
//! Centring the columns once and forming `Xᵀ X` yields every pairwise
//! co-moment in one product.

use nalgebra::DMatrix;

/// A column whose RMS deviation is below this fraction of its largest
/// magnitude is treated as constant.
const RELATIVE_EPS: f64 = 1e-12;

/// Pairwise Pearson coefficients between the columns of `obs`.
///
/// The diagonal is always `1.0`. Off-diagonal entries are `None` when either
/// column is constant or there are fewer than two observations.
pub fn correlation_matrix(obs: &DMatrix<f64>) -> Vec<Vec<Option<f64>>> {
    let (n, k) = obs.shape();
    let mut out = vec![vec![None; k]; k];
    for (i, row) in out.iter_mut().enumerate() {
        row[i] = Some(1.0);
    }
    if n < 2 {
        return out;
    }

    let means: Vec<f64> = obs.column_iter().map(|c| c.mean()).collect();
    let centred = DMatrix::from_fn(n, k, |r, c| obs[(r, c)] - means[c]);
    let comoments = centred.transpose() * &centred;
    let varying: Vec<bool> = obs
        .column_iter()
        .enumerate()
        .map(|(c, col)| (comoments[(c, c)] / n as f64).sqrt() > RELATIVE_EPS * col.amax())
        .collect();

    for i in 0..k {
        for j in (i + 1)..k {
            let denom = (comoments[(i, i)] * comoments[(j, j)]).sqrt();
            let r = (varying[i] && varying[j]).then(|| (comoments[(i, j)] / denom).clamp(-1.0, 1.0));
            out[i][j] = r;
            out[j][i] = r;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_positive_and_negative() {
        // columns: x, 2x + 1, -x
        let obs = DMatrix::from_row_slice(4, 3, &[
            1.0, 3.0, -1.0,
            2.0, 5.0, -2.0,
            3.0, 7.0, -3.0,
            4.0, 9.0, -4.0,
        ]);
        let m = correlation_matrix(&obs);
        assert!((m[0][1].unwrap() - 1.0).abs() < 1e-12);
        assert!((m[0][2].unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(m[1][1], Some(1.0));
    }

    #[test]
    fn known_value() {
        // x = [1,2,3,4,5], y = [2,4,5,4,5] → r = 0.7745966692
        let obs = DMatrix::from_row_slice(5, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 5.0, 4.0, 4.0, 5.0, 5.0]);
        let m = correlation_matrix(&obs);
        assert!((m[0][1].unwrap() - 0.774_596_669_2).abs() < 1e-9);
        assert_eq!(m[0][1], m[1][0]);
    }

    #[test]
    fn constant_column_is_undefined() {
        let obs = DMatrix::from_row_slice(3, 2, &[1.0, 5.0, 2.0, 5.0, 3.0, 5.0]);
        let m = correlation_matrix(&obs);
        assert_eq!(m[0][1], None);
        assert_eq!(m[1][1], Some(1.0));
    }

    #[test]
    fn tiny_scale_series_still_correlate() {
        let obs = DMatrix::from_row_slice(3, 2, &[1e-9, 3e-9, 2e-9, 2e-9, 3e-9, 1e-9]);
        let m = correlation_matrix(&obs);
        assert!((m[0][1].unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_fraction_is_constant() {
        let obs = DMatrix::from_row_slice(3, 2, &[0.1, 1.0, 0.1, 2.0, 0.1, 3.0]);
        assert_eq!(correlation_matrix(&obs)[0][1], None);
    }

    #[test]
    fn single_observation_is_undefined() {
        let obs = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let m = correlation_matrix(&obs);
        assert_eq!(m, vec![vec![Some(1.0), None], vec![None, Some(1.0)]]);
    }
}
