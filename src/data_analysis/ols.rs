// src/data_analysis/ols.rs

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::constants::RANK_RELATIVE_TOLERANCE;
use crate::errors::{AnalysisError, AnalysisResult};

/// Raw least-squares estimate produced by a solver.
#[derive(Debug, Clone)]
pub struct OlsEstimate {
    /// Coefficients, one per design column.
    pub coefficients: Array1<f64>,
    /// `(XᵀX)⁻¹`; scale by the residual variance to get the coefficient covariance.
    pub covariance_unscaled: Array2<f64>,
    /// Sum of squared residuals.
    pub residual_sum_of_squares: f64,
    /// Numerical rank of the design matrix.
    pub rank: usize,
}

/// A least-squares solver for `design · β ≈ response`.
///
/// Implementations must reject designs that are not full column rank, since
/// the coefficient covariance is undefined for them.
pub trait LinearRegressionSolver {
    fn fit(&self, design: &Array2<f64>, response: &Array1<f64>) -> AnalysisResult<OlsEstimate>;
}

/// Least-squares solver built on nalgebra's singular value decomposition.
///
/// The rank is the number of singular values above `rank_tolerance` times the
/// largest one. `(XᵀX)⁻¹` is `X⁺ X⁺ᵀ` for a full-rank design.
#[derive(Debug, Clone, Copy)]
pub struct SvdSolver {
    pub rank_tolerance: f64,
}

impl Default for SvdSolver {
    fn default() -> Self {
        Self {
            rank_tolerance: RANK_RELATIVE_TOLERANCE,
        }
    }
}

impl SvdSolver {
    pub fn new(rank_tolerance: f64) -> Self {
        Self { rank_tolerance }
    }
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

fn to_dvector(v: &Array1<f64>) -> DVector<f64> {
    DVector::from_iterator(v.len(), v.iter().copied())
}

/// Counts singular values that are not negligible relative to the largest one.
fn numerical_rank(singular_values: &DVector<f64>, tolerance: f64) -> usize {
    let max_sv = singular_values.iter().fold(0.0_f64, |acc, s| acc.max(*s));
    if max_sv == 0.0 {
        return 0;
    }
    singular_values
        .iter()
        .filter(|s| **s > tolerance * max_sv)
        .count()
}

impl LinearRegressionSolver for SvdSolver {
    fn fit(&self, design: &Array2<f64>, response: &Array1<f64>) -> AnalysisResult<OlsEstimate> {
        let (n_obs, n_params) = design.dim();
        if response.len() != n_obs {
            return Err(AnalysisError::ShapeMismatch {
                design_rows: n_obs,
                response_len: response.len(),
            });
        }
        if n_obs <= n_params {
            return Err(AnalysisError::InsufficientObservations {
                rows: n_obs,
                params: n_params,
            });
        }

        let bad_row = design
            .rows()
            .into_iter()
            .position(|row| row.iter().any(|v| !v.is_finite()));
        if let Some(row) = bad_row {
            return Err(AnalysisError::NonFiniteValue {
                column: "design",
                row,
            });
        }
        if let Some(row) = response.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue {
                column: "response",
                row,
            });
        }

        let x = to_dmatrix(design);
        let y = to_dvector(response);

        let svd = x.clone().svd(true, true);
        let rank = numerical_rank(&svd.singular_values, self.rank_tolerance);
        if rank < n_params {
            return Err(AnalysisError::SingularDesign {
                rank,
                params: n_params,
            });
        }

        let max_sv = svd.singular_values.max();
        let pinv = svd
            .pseudo_inverse(self.rank_tolerance * max_sv)
            .map_err(|_| AnalysisError::SingularDesign {
                rank,
                params: n_params,
            })?;

        let beta = &pinv * &y;
        let unscaled = &pinv * pinv.transpose();
        let residuals = &y - &x * &beta;
        let residual_sum_of_squares = residuals.norm_squared();

        tracing::debug!(
            n_obs,
            n_params,
            rank,
            residual_sum_of_squares,
            "SVD least-squares solve complete"
        );

        Ok(OlsEstimate {
            coefficients: beta.iter().copied().collect(),
            covariance_unscaled: Array2::from_shape_fn((n_params, n_params), |(i, j)| {
                unscaled[(i, j)]
            }),
            residual_sum_of_squares,
            rank,
        })
    }
}
