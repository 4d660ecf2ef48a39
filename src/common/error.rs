//! Error types for tractor_trailer_sim

use thiserror::Error;

/// Main error type for model evaluation and simulation runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A state or input vector does not have the length the model expects
    #[error("invalid {what} dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Discretization method name is not recognized
    #[error("unsupported discretization scheme: {0}")]
    UnsupportedScheme(String),
    /// Leading dimension of the control input matrix does not match `nu`
    #[error("control input matrix has {actual} rows, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// Invalid model parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SimulationError {
    pub(crate) fn state_dimension(expected: usize, actual: usize) -> Self {
        SimulationError::InvalidDimension {
            what: "state",
            expected,
            actual,
        }
    }

    pub(crate) fn input_dimension(expected: usize, actual: usize) -> Self {
        SimulationError::InvalidDimension {
            what: "input",
            expected,
            actual,
        }
    }
}

/// Result type alias for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimulationError::state_dimension(4, 6);
        assert_eq!(format!("{}", err), "invalid state dimension: expected 4, got 6");

        let err = SimulationError::UnsupportedScheme("KR2".to_string());
        assert_eq!(format!("{}", err), "unsupported discretization scheme: KR2");
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = SimulationError::DimensionMismatch { expected: 2, actual: 10 };
        assert_eq!(format!("{}", err), "control input matrix has 10 rows, expected 2");
    }
}
