//! Error types shared by the matrix, network and simulation layers.
//!
//! Every variant describes a broken contract between caller and core. None of
//! them is retried or silently corrected.

use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Error)]
pub enum Error {
    /// A matrix operation received operands with incompatible shapes.
    #[error("{op}: incompatible matrix dimensions {}x{} and {}x{}", left.0, left.1, right.0, right.1)]
    ShapeMismatch {
        /// Name of the failing operation.
        op: &'static str,
        /// Shape (`rows`, `cols`) of the left operand.
        left: (usize, usize),
        /// Shape (`rows`, `cols`) of the right operand.
        right: (usize, usize),
    },
    /// The sensory vector length does not match the network input layer.
    #[error("expected {expected} network inputs, got {actual}")]
    InvalidInputLength {
        /// Size of the input layer.
        expected: usize,
        /// Length of the vector supplied.
        actual: usize,
    },
    /// The training target length does not match the network output layer.
    #[error("expected {expected} training targets, got {actual}")]
    InvalidTargetLength {
        /// Size of the output layer.
        expected: usize,
        /// Length of the vector supplied.
        actual: usize,
    },
    /// Layer sizes are zero or do not fit the senses and actions of a bacterium.
    #[error("unsupported layer sizes {input}/{hidden}/{output}")]
    InvalidTopology {
        /// Input layer size.
        input: usize,
        /// Hidden layer size.
        hidden: usize,
        /// Output layer size.
        output: usize,
    },
    /// Simulation parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Reading a parameter file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A parameter file was not valid JSON for [`Params`](super::params::Params).
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias for fallible simulation operations.
pub type Result<T> = std::result::Result<T, Error>;
