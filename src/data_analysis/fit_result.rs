// src/data_analysis/fit_result.rs

use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::constants::{COEFFICIENT_NAMES, PERFECT_FIT_RELATIVE_TOLERANCE};
use crate::data_analysis::ols::OlsEstimate;
use crate::errors::{AnalysisError, AnalysisResult};

/// Ordinary least squares fit of `mosquitos ~ temperature + rainfall`.
///
/// All per-coefficient vectors are ordered Intercept, temperature, rainfall.
///
/// A perfect fit (residual norm within floating-point error of zero) has
/// zero residual variance: standard errors are 0, t-statistics are infinite
/// with the sign of the coefficient and p-values are 0. A coefficient that is
/// exactly zero gets `NaN` for both.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub coefficients: Array1<f64>,
    pub std_errors: Array1<f64>,
    pub t_values: Array1<f64>,
    pub p_values: Array1<f64>,
    pub covariance: Array2<f64>,
    pub residual_variance: f64,
    pub degrees_of_freedom: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub fitted_values: Array1<f64>,
    pub residuals: Array1<f64>,
    perfect_fit: bool,
}

fn two_sided_p_value(t: f64, distribution: Option<&StudentsT>) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    match distribution {
        Some(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        None => f64::NAN,
    }
}

/// True when the residual norm is indistinguishable from zero.
///
/// The threshold is the larger of a fraction of the centered response
/// spread and the floating-point error of evaluating `X·β`. Neither depends
/// on a constant offset in the response.
fn is_within_roundoff(
    residual_sum_of_squares: f64,
    total_sum_of_squares: f64,
    design: &Array2<f64>,
    coefficients: &Array1<f64>,
) -> bool {
    let design_norm = design.mapv(|v| v * v).sum().sqrt();
    let coefficient_norm = coefficients.dot(coefficients).sqrt();
    let roundoff = f64::EPSILON * design.nrows() as f64 * design_norm * coefficient_norm;
    let spread = PERFECT_FIT_RELATIVE_TOLERANCE * total_sum_of_squares.sqrt();
    residual_sum_of_squares.sqrt() <= roundoff.max(spread)
}

impl OlsFit {
    /// Derives inference statistics from a solver estimate.
    ///
    /// The estimate is checked against the design first, so a solver that
    /// accepts too few rows or returns the wrong number of coefficients
    /// yields an error instead of a malformed fit.
    pub(crate) fn from_estimate(
        estimate: OlsEstimate,
        design: &Array2<f64>,
        response: &Array1<f64>,
    ) -> AnalysisResult<Self> {
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
        if estimate.coefficients.len() != n_params {
            return Err(AnalysisError::CoefficientCountMismatch {
                expected: n_params,
                found: estimate.coefficients.len(),
            });
        }
        if estimate.covariance_unscaled.dim() != (n_params, n_params) {
            return Err(AnalysisError::CoefficientCountMismatch {
                expected: n_params,
                found: estimate.covariance_unscaled.nrows(),
            });
        }
        let degrees_of_freedom = n_obs - n_params;

        let fitted_values = design.dot(&estimate.coefficients);
        let residuals = response - &fitted_values;

        let mean = response.mean().unwrap_or(0.0);
        let total_sum_of_squares = response.mapv(|y| (y - mean).powi(2)).sum();
        let perfect_fit = is_within_roundoff(
            estimate.residual_sum_of_squares,
            total_sum_of_squares,
            design,
            &estimate.coefficients,
        );

        let residual_variance = if perfect_fit {
            0.0
        } else {
            estimate.residual_sum_of_squares / degrees_of_freedom as f64
        };

        let covariance = &estimate.covariance_unscaled * residual_variance;
        let std_errors = covariance.diag().mapv(|v| v.max(0.0).sqrt());

        let t_values: Array1<f64> = estimate
            .coefficients
            .iter()
            .zip(std_errors.iter())
            .map(|(&beta, &se)| {
                if se > 0.0 {
                    beta / se
                } else if beta == 0.0 {
                    f64::NAN
                } else {
                    beta.signum() * f64::INFINITY
                }
            })
            .collect();

        let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64).ok();
        let p_values = t_values.mapv(|t| two_sided_p_value(t, distribution.as_ref()));

        let r_squared = if total_sum_of_squares > 0.0 {
            (1.0 - estimate.residual_sum_of_squares / total_sum_of_squares).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let adj_r_squared =
            1.0 - (1.0 - r_squared) * (n_obs - 1) as f64 / degrees_of_freedom as f64;

        Ok(Self {
            coefficients: estimate.coefficients,
            std_errors,
            t_values,
            p_values,
            covariance,
            residual_variance,
            degrees_of_freedom,
            r_squared,
            adj_r_squared,
            fitted_values,
            residuals,
            perfect_fit,
        })
    }

    pub fn is_perfect_fit(&self) -> bool {
        self.perfect_fit
    }

    /// Coefficient by name (`Intercept`, `temperature` or `rainfall`).
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        COEFFICIENT_NAMES
            .iter()
            .position(|&n| n == name)
            .and_then(|i| self.coefficients.get(i).copied())
    }

    /// Predicts the mosquito population for one observation.
    pub fn predict(&self, temperature: f64, rainfall: f64) -> f64 {
        self.coefficients
            .iter()
            .zip([1.0, temperature, rainfall])
            .map(|(beta, x)| beta * x)
            .sum()
    }

    /// The t-statistics line printed after every fit.
    pub fn t_statistics_line(&self) -> String {
        let parts: Vec<String> = COEFFICIENT_NAMES
            .iter()
            .zip(self.t_values.iter())
            .map(|(name, t)| format!("{name}={t:.6}"))
            .collect();
        format!("t-statistics: {}", parts.join(" "))
    }
}
