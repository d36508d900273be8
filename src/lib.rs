// src/lib.rs - Library interface

pub mod constants;
pub mod converter;
pub mod data_analysis;
pub mod data_input;
pub mod errors;
pub mod plot_framework;
pub mod plot_functions;

pub use converter::{
    celsius_to_fahrenheit, fahrenheit_text_to_celsius, fahrenheit_to_celsius, parse_fahrenheit,
    FahrenheitToCelsius,
};
pub use data_analysis::analyzer::{
    analyze, analyze_with_fit, design_matrix, Analysis, Analyzer, AnalyzerBuilder,
};
pub use data_analysis::fit_result::OlsFit;
pub use data_analysis::ols::{LinearRegressionSolver, OlsEstimate, SvdSolver};
pub use data_input::dataset::{ColumnTable, Dataset};
pub use errors::{AnalysisError, AnalysisResult, ErrorKind};
pub use plot_framework::{
    render_figure, save_png, save_svg, Figure, MarkerShape, MarkerStyle, Panel,
};
