// src/errors.rs

use thiserror::Error;

/// Coarse classification of analysis failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required column is absent.
    Schema,
    /// Column lengths disagree, or there are too few rows to fit.
    Dimension,
    /// The design matrix is rank-deficient.
    Singularity,
    /// Input could not be read as a finite number.
    Type,
    /// The plotting backend failed.
    Render,
}

/// Errors that can occur while converting, fitting or rendering.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing required column '{name}'")]
    MissingColumn { name: &'static str },

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Insufficient observations: {rows} rows for {params} parameters (need rows > parameters)")]
    InsufficientObservations { rows: usize, params: usize },

    #[error("Dimension mismatch: design has {design_rows} rows, response has {response_len} elements")]
    ShapeMismatch {
        design_rows: usize,
        response_len: usize,
    },

    #[error("Solver returned {found} coefficients for {expected} design columns")]
    CoefficientCountMismatch { expected: usize, found: usize },

    #[error("Design matrix is singular: rank {rank} of {params} columns")]
    SingularDesign { rank: usize, params: usize },

    #[error("Not a numeric temperature: '{input}'")]
    NonNumeric { input: String },

    #[error("Non-finite value in '{column}' at row {row}")]
    NonFiniteValue { column: &'static str, row: usize },

    #[error("Render error: {0}")]
    Render(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingColumn { .. } => ErrorKind::Schema,
            AnalysisError::LengthMismatch { .. }
            | AnalysisError::InsufficientObservations { .. }
            | AnalysisError::ShapeMismatch { .. }
            | AnalysisError::CoefficientCountMismatch { .. } => ErrorKind::Dimension,
            AnalysisError::SingularDesign { .. } => ErrorKind::Singularity,
            AnalysisError::NonNumeric { .. } | AnalysisError::NonFiniteValue { .. } => {
                ErrorKind::Type
            }
            AnalysisError::Render(_) => ErrorKind::Render,
        }
    }
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AnalysisError::MissingColumn { name: "rainfall" }.kind(),
            ErrorKind::Schema
        );
        assert_eq!(
            AnalysisError::LengthMismatch {
                column: "rainfall",
                expected: 4,
                found: 3
            }
            .kind(),
            ErrorKind::Dimension
        );
        assert_eq!(
            AnalysisError::SingularDesign { rank: 2, params: 3 }.kind(),
            ErrorKind::Singularity
        );
        assert_eq!(
            AnalysisError::NonNumeric {
                input: "warm".to_string()
            }
            .kind(),
            ErrorKind::Type
        );
        assert_eq!(
            AnalysisError::NonFiniteValue {
                column: "temperature",
                row: 3
            }
            .kind(),
            ErrorKind::Type
        );
        assert_eq!(
            AnalysisError::CoefficientCountMismatch {
                expected: 3,
                found: 2
            }
            .kind(),
            ErrorKind::Dimension
        );
    }

    #[test]
    fn test_error_messages_name_the_column() {
        let err = AnalysisError::MissingColumn { name: "rainfall" };
        assert_eq!(err.to_string(), "Missing required column 'rainfall'");
    }
}
