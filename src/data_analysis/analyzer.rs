// src/data_analysis/analyzer.rs

use ndarray::{Array1, Array2};

use crate::constants::{FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN};
use crate::data_analysis::fit_result::OlsFit;
use crate::data_analysis::ols::{SvdSolver, LinearRegressionSolver};
use crate::data_input::dataset::{ColumnTable, Dataset};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::plot_framework::Figure;
use crate::plot_functions::plot_diagnostics::build_diagnostic_figure;

/// Figure and fit from one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub figure: Figure,
    pub fit: OlsFit,
}

/// Design matrix with columns `[1, temperature, rainfall]`.
pub fn design_matrix(dataset: &Dataset) -> Array2<f64> {
    let temperature = dataset.temperature();
    let rainfall = dataset.rainfall();
    Array2::from_shape_fn((dataset.len(), 3), |(row, col)| match col {
        0 => 1.0,
        1 => temperature[row],
        _ => rainfall[row],
    })
}

/// Fits `mosquitos ~ temperature + rainfall` and builds the diagnostic figure.
#[derive(Debug, Clone)]
pub struct Analyzer<S = SvdSolver> {
    solver: S,
    figure_width_in: f64,
    figure_height_in: f64,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// SVD solver, 6x9 inch figure.
    pub fn new() -> Self {
        AnalyzerBuilder::new().build()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }
}

impl<S: LinearRegressionSolver> Analyzer<S> {
    /// Fits the model without printing or plotting.
    ///
    /// Fails with `InsufficientObservations` before the solver runs when
    /// there are no residual degrees of freedom.
    pub fn fit(&self, dataset: &Dataset) -> AnalysisResult<OlsFit> {
        let design = design_matrix(dataset);
        if design.nrows() <= design.ncols() {
            return Err(AnalysisError::InsufficientObservations {
                rows: design.nrows(),
                params: design.ncols(),
            });
        }
        let response = Array1::from(dataset.mosquitos().to_vec());
        let estimate = self.solver.fit(&design, &response)?;
        let fit = OlsFit::from_estimate(estimate, &design, &response)?;

        tracing::debug!(
            n_obs = dataset.len(),
            coefficients = ?fit.coefficients.to_vec(),
            std_errors = ?fit.std_errors.to_vec(),
            r_squared = fit.r_squared,
            perfect_fit = fit.is_perfect_fit(),
            "OLS fit complete"
        );
        Ok(fit)
    }

    /// Fits, prints the t-statistics and builds the figure.
    pub fn analyze_dataset(&self, dataset: &Dataset) -> AnalysisResult<Analysis> {
        let fit = self.fit(dataset)?;
        println!("{}", fit.t_statistics_line());

        let predicted = fit.fitted_values.to_vec();
        let figure = build_diagnostic_figure(
            Figure::new(self.figure_width_in, self.figure_height_in),
            dataset,
            &predicted,
        );
        Ok(Analysis { figure, fit })
    }

    /// Validates `table`, then runs [`Analyzer::analyze_dataset`].
    pub fn analyze_with_fit(&self, table: &ColumnTable) -> AnalysisResult<Analysis> {
        let dataset = Dataset::from_table(table)?;
        self.analyze_dataset(&dataset)
    }

    pub fn analyze(&self, table: &ColumnTable) -> AnalysisResult<Figure> {
        self.analyze_with_fit(table).map(|analysis| analysis.figure)
    }
}

/// Builder for [`Analyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder<S = SvdSolver> {
    solver: S,
    figure_width_in: f64,
    figure_height_in: f64,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            solver: SvdSolver::default(),
            figure_width_in: FIGURE_WIDTH_IN,
            figure_height_in: FIGURE_HEIGHT_IN,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LinearRegressionSolver> AnalyzerBuilder<S> {
    pub fn solver<T: LinearRegressionSolver>(self, solver: T) -> AnalyzerBuilder<T> {
        AnalyzerBuilder {
            solver,
            figure_width_in: self.figure_width_in,
            figure_height_in: self.figure_height_in,
        }
    }

    pub fn figure_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.figure_width_in = width_in;
        self.figure_height_in = height_in;
        self
    }

    pub fn build(self) -> Analyzer<S> {
        Analyzer {
            solver: self.solver,
            figure_width_in: self.figure_width_in,
            figure_height_in: self.figure_height_in,
        }
    }
}

/// Fits the mosquito model on `data`, prints the t-statistics and returns
/// the three-panel diagnostic figure.
pub fn analyze(data: &ColumnTable) -> AnalysisResult<Figure> {
    Analyzer::new().analyze(data)
}

/// Like [`analyze`], also returning the fit.
pub fn analyze_with_fit(data: &ColumnTable) -> AnalysisResult<Analysis> {
    Analyzer::new().analyze_with_fit(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::ols::OlsEstimate;
    use crate::errors::ErrorKind;

    fn noisy_dataset() -> Dataset {
        let temperature = vec![80.0, 82.0, 85.0, 87.0, 90.0, 78.0, 84.0, 88.0, 91.0, 79.0];
        let rainfall = vec![0.2, 0.6, 0.3, 0.9, 0.4, 0.8, 0.1, 0.5, 0.7, 0.35];
        let noise = [0.8, -1.1, 0.4, 0.9, -0.6, -0.3, 1.2, -0.9, 0.2, -0.5];
        let mosquitos = temperature
            .iter()
            .zip(&rainfall)
            .zip(noise)
            .map(|((t, r), e)| 10.0 + 1.5 * t + 40.0 * r + e)
            .collect();
        Dataset::new(temperature, rainfall, mosquitos).unwrap()
    }

    #[test]
    fn test_design_matrix_layout() {
        let dataset = Dataset::new(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]).unwrap();
        let design = design_matrix(&dataset);
        assert_eq!(design.dim(), (2, 3));
        assert_eq!(design.row(0).to_vec(), vec![1.0, 1.0, 3.0]);
        assert_eq!(design.row(1).to_vec(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_figure_panels_follow_fit() {
        let dataset = noisy_dataset();
        let analysis = Analyzer::new().analyze_dataset(&dataset).unwrap();

        assert_eq!(analysis.figure.panel_count(), 3);
        let predicted = analysis.figure.panels[0].xs();
        for (i, p) in predicted.iter().enumerate() {
            let expected =
                analysis.fit.predict(dataset.temperature()[i], dataset.rainfall()[i]);
            assert!((p - expected).abs() < 1e-9);
        }
        assert_eq!(analysis.figure.panels[1].xs(), dataset.temperature());
        assert_eq!(analysis.figure.panels[2].xs(), dataset.rainfall());
        assert_eq!(analysis.figure.panels[2].ys(), dataset.mosquitos());
    }

    #[test]
    fn test_builder_figure_size() {
        let analyzer = Analyzer::builder().figure_size(4.0, 6.0).build();
        let analysis = analyzer.analyze_dataset(&noisy_dataset()).unwrap();
        assert_eq!(analysis.figure.width_in, 4.0);
        assert_eq!(analysis.figure.height_in, 6.0);
    }

    struct RejectingSolver;

    impl LinearRegressionSolver for RejectingSolver {
        fn fit(&self, design: &Array2<f64>, _: &Array1<f64>) -> AnalysisResult<OlsEstimate> {
            Err(AnalysisError::SingularDesign {
                rank: 0,
                params: design.ncols(),
            })
        }
    }

    #[test]
    fn test_custom_solver_errors_propagate() {
        let analyzer = Analyzer::builder().solver(RejectingSolver).build();
        let err = analyzer.analyze_dataset(&noisy_dataset()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Singularity);
    }

    /// Accepts any input and returns `coefficient_count` zeros.
    struct LaxSolver {
        coefficient_count: usize,
    }

    impl LinearRegressionSolver for LaxSolver {
        fn fit(&self, _: &Array2<f64>, _: &Array1<f64>) -> AnalysisResult<OlsEstimate> {
            let p = self.coefficient_count;
            Ok(OlsEstimate {
                coefficients: Array1::zeros(p),
                covariance_unscaled: Array2::eye(p),
                residual_sum_of_squares: 0.0,
                rank: p,
            })
        }
    }

    #[test]
    fn test_lax_solver_with_too_few_rows_is_dimension_error() {
        let dataset = Dataset::new(vec![70.0, 80.0], vec![0.1, 0.5], vec![100.0, 140.0]).unwrap();
        let analyzer = Analyzer::builder()
            .solver(LaxSolver {
                coefficient_count: 3,
            })
            .build();

        let err = analyzer.analyze_dataset(&dataset).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        assert!(matches!(
            err,
            AnalysisError::InsufficientObservations { rows: 2, params: 3 }
        ));
    }

    #[test]
    fn test_lax_solver_with_short_coefficients_is_dimension_error() {
        let analyzer = Analyzer::builder()
            .solver(LaxSolver {
                coefficient_count: 2,
            })
            .build();

        let err = analyzer.fit(&noisy_dataset()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        assert!(matches!(
            err,
            AnalysisError::CoefficientCountMismatch {
                expected: 3,
                found: 2
            }
        ));
    }
}
